//! Robust scale estimator tests: MAD fixtures, S_n, and quantile range.

mod common;

use common::{
    assert_vectors_eq, random_vector, slow_moving, stat_mad0, stat_qrange, stat_sn, BOUNDARIES,
    EPSILON,
};
use rollstat::{
    moving_mad, moving_mad0, moving_scale_qn, moving_scale_qn_inplace, moving_scale_sn,
    moving_scale_sn_inplace, Boundary, Error, Workspace,
};

// ==================== MAD Fixtures ====================

#[test]
fn test_mad0_fixture_pad_zero_k3() {
    let x = [-1.0, 5.7, 3.4, 1.1, 9.5, -23.7, -5.6, 0.2];
    let expected_median = [0.0, 3.4, 3.4, 3.4, 1.1, -5.6, -5.6, 0.0];
    let expected_mad = [1.0, 2.3, 2.3, 2.3, 8.4, 15.1, 5.8, 0.2];

    let mut xmedian = [0.0_f64; 8];
    let mut xmad = [0.0_f64; 8];
    let mut w = Workspace::new(3).unwrap();
    moving_mad0(Boundary::PadZero, &x, &mut xmedian, &mut xmad, &mut w).unwrap();

    assert_vectors_eq(&xmedian, &expected_median, EPSILON, "mad0 fixture median");
    assert_vectors_eq(&xmad, &expected_mad, EPSILON, "mad0 fixture mad");
}

#[test]
fn test_mad0_fixture_asymmetric_even_windows() {
    let x = [
        4.38, 3.81, 7.65, 7.95, 1.86, 4.89, 4.45, 6.46, 0.09, 7.54, 2.76, 6.79, 6.55, 1.62, 1.18,
        4.98, 9.59, 3.40, 5.85, 2.23,
    ];
    let expected_median = [
        0.0, 1.905, 2.835, 4.095, 4.415, 4.67, 4.67, 5.675, 4.67, 4.67, 5.675, 5.455, 4.61, 3.87,
        5.765, 4.19, 5.415, 4.19, 2.815, 2.815,
    ];
    let expected_mad = [
        0.0, 1.905, 2.835, 2.895, 1.58, 1.325, 2.30, 1.92, 2.36, 2.015, 1.17, 1.71, 2.555, 2.685,
        2.39, 2.465, 1.695, 2.16, 1.90, 2.49,
    ];

    let mut xmedian = [0.0_f64; 20];
    let mut xmad = [0.0_f64; 20];
    let mut w = Workspace::with_shape(5, 2).unwrap();
    moving_mad0(Boundary::PadZero, &x, &mut xmedian, &mut xmad, &mut w).unwrap();

    assert_vectors_eq(
        &xmedian,
        &expected_median,
        EPSILON,
        "mad0 fixture H=5 J=2 median",
    );
    assert_vectors_eq(&xmad, &expected_mad, EPSILON, "mad0 fixture H=5 J=2 mad");
}

#[test]
fn test_mad_is_mad0_times_normal_scale() {
    let x = random_vector(100, 19);
    let mut med = vec![0.0; x.len()];
    let mut raw = vec![0.0; x.len()];
    let mut scaled = vec![0.0; x.len()];
    let mut w = Workspace::new(7).unwrap();

    moving_mad0(Boundary::PadEdgeValue, &x, &mut med, &mut raw, &mut w).unwrap();
    moving_mad(Boundary::PadEdgeValue, &x, &mut med, &mut scaled, &mut w).unwrap();

    for i in 0..x.len() {
        assert!(
            common::approx_eq(scaled[i], raw[i] * 1.4826022185056018, EPSILON),
            "i={i}"
        );
    }
}

#[test]
fn test_mad0_matches_brute_force_all_boundaries() {
    let x = random_vector(200, 37);
    for boundary in BOUNDARIES {
        for (h, j) in [(3, 3), (5, 2), (0, 4)] {
            let want = slow_moving(boundary, &x, h, j, stat_mad0);
            let mut med = vec![0.0; x.len()];
            let mut got = vec![0.0; x.len()];
            let mut w = Workspace::with_shape(h, j).unwrap();
            moving_mad0(boundary, &x, &mut med, &mut got, &mut w).unwrap();
            assert_vectors_eq(
                &got,
                &want,
                EPSILON,
                &format!("mad0 random {boundary:?} h={h} j={j}"),
            );
        }
    }
}

#[test]
fn test_mad0_alternating_signs() {
    // x = 1, -2, 3, -4, ..., alternating growing magnitudes
    let x: Vec<f64> = (1..=100)
        .map(|i| if i % 2 == 0 { -(i as f64) } else { i as f64 })
        .collect();
    for boundary in BOUNDARIES {
        let want = slow_moving(boundary, &x, 3, 3, stat_mad0);
        let mut med = vec![0.0; x.len()];
        let mut got = vec![0.0; x.len()];
        let mut w = Workspace::new(7).unwrap();
        moving_mad0(boundary, &x, &mut med, &mut got, &mut w).unwrap();
        assert_vectors_eq(&got, &want, EPSILON, &format!("mad0 alternating {boundary:?}"));
    }
}

// ==================== S_n ====================

#[test]
fn test_sn_matches_brute_force_all_boundaries() {
    let x = random_vector(150, 43);
    for boundary in BOUNDARIES {
        for (h, j) in [(2, 2), (4, 1), (0, 5)] {
            let want = slow_moving(boundary, &x, h, j, stat_sn);
            let mut got = vec![0.0; x.len()];
            let mut w = Workspace::with_shape(h, j).unwrap();
            moving_scale_sn(boundary, &x, &mut got, &mut w).unwrap();
            assert_vectors_eq(
                &got,
                &want,
                EPSILON,
                &format!("sn random {boundary:?} h={h} j={j}"),
            );
        }
    }
}

#[test]
fn test_sn_constant_data_is_zero() {
    let x = vec![2.5; 40];
    let mut got = vec![1.0; x.len()];
    let mut w = Workspace::new(5).unwrap();
    moving_scale_sn(Boundary::PadEdgeValue, &x, &mut got, &mut w).unwrap();
    for (i, &v) in got.iter().enumerate() {
        assert!(common::approx_eq(v, 0.0, EPSILON), "i={i}");
    }
}

// ==================== Quantile Range ====================

#[test]
fn test_qrange_matches_brute_force_all_boundaries() {
    let x = random_vector(200, 53);
    for boundary in BOUNDARIES {
        for q in [0.0, 0.1, 0.25] {
            let want = slow_moving(boundary, &x, 4, 4, |window| stat_qrange(window, q));
            let mut got = vec![0.0; x.len()];
            let mut w = Workspace::new(9).unwrap();
            moving_scale_qn(boundary, &x, q, &mut got, &mut w).unwrap();
            assert_vectors_eq(
                &got,
                &want,
                EPSILON,
                &format!("qrange random {boundary:?} q={q}"),
            );
        }
    }
}

#[test]
fn test_qrange_is_nonnegative() {
    let x = random_vector(120, 59);
    let mut got = vec![0.0; x.len()];
    let mut w = Workspace::new(5).unwrap();
    moving_scale_qn(Boundary::Truncate, &x, 0.25, &mut got, &mut w).unwrap();
    assert!(got.iter().all(|&v| v >= 0.0));
}

// ==================== In-Place Operation ====================

#[test]
fn test_scale_inplace_matches_out_of_place() {
    let x = random_vector(90, 67);
    for boundary in BOUNDARIES {
        let mut w = Workspace::with_shape(3, 2).unwrap();

        let mut y = vec![0.0; x.len()];
        moving_scale_sn(boundary, &x, &mut y, &mut w).unwrap();
        let mut z = x.clone();
        moving_scale_sn_inplace(boundary, &mut z, &mut w).unwrap();
        assert_eq!(z, y, "sn in-place {boundary:?}");

        moving_scale_qn(boundary, &x, 0.25, &mut y, &mut w).unwrap();
        z = x.clone();
        moving_scale_qn_inplace(boundary, 0.25, &mut z, &mut w).unwrap();
        assert_eq!(z, y, "qrange in-place {boundary:?}");
    }
}

// ==================== Validation ====================

#[test]
fn test_scale_estimators_reject_short_windows_and_bad_quantiles() {
    let x = [1.0, 2.0, 3.0];
    let mut med = [0.0_f64; 3];
    let mut y = [0.0_f64; 3];

    let mut w1 = Workspace::new(1).unwrap();
    assert!(matches!(
        moving_mad0(Boundary::PadZero, &x, &mut med, &mut y, &mut w1),
        Err(Error::InvalidWindow { .. })
    ));
    assert!(matches!(
        moving_scale_sn(Boundary::PadZero, &x, &mut y, &mut w1),
        Err(Error::InvalidWindow { .. })
    ));

    let mut w = Workspace::new(3).unwrap();
    assert!(matches!(
        moving_scale_qn(Boundary::PadZero, &x, 0.75, &mut y, &mut w),
        Err(Error::InvalidWindow { .. })
    ));
    assert!(matches!(
        moving_scale_qn(Boundary::PadZero, &x, -0.01, &mut y, &mut w),
        Err(Error::InvalidWindow { .. })
    ));
    // boundary value is accepted
    assert!(moving_scale_qn(Boundary::PadZero, &x, 0.5, &mut y, &mut w).is_ok());
}

#[test]
fn test_failed_scale_calls_leave_output_untouched() {
    let x = [1.0, 2.0, 3.0];
    let sentinel = [9.0_f64; 3];

    let mut y = sentinel;
    let mut w1 = Workspace::new(1).unwrap();
    assert!(matches!(
        moving_scale_sn(Boundary::PadZero, &x, &mut y, &mut w1),
        Err(Error::InvalidWindow { .. })
    ));
    assert_eq!(y, sentinel, "sn rejected call wrote into output");

    y = sentinel;
    let mut w = Workspace::new(3).unwrap();
    assert!(matches!(
        moving_scale_qn(Boundary::PadZero, &x, 0.9, &mut y, &mut w),
        Err(Error::InvalidWindow { .. })
    ));
    assert_eq!(y, sentinel, "qrange rejected call wrote into output");
}
