use approx::assert_abs_diff_eq;
use fastBoost::prelude::*;
use ndarray::Array1;

/// Two well-separated clusters with a 0/1 response.
fn separable_frame(n: usize) -> Frame {
    let x1: Vec<f64> = (0..n)
        .map(|i| if i < n / 2 { i as f64 * 0.01 } else { 10.0 + i as f64 * 0.01 })
        .collect();
    let x2: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).sin()).collect();
    let y: Vec<f64> = (0..n).map(|i| if i < n / 2 { 0.0 } else { 1.0 }).collect();

    let mut frame = Frame::new();
    frame.add_numeric("x1", &x1).unwrap();
    frame.add_numeric("x2", &x2).unwrap();
    frame.add_numeric("y", &y).unwrap();
    frame.cast_categorical("y").unwrap();
    frame
}

#[test]
fn bernoulli_classifies_separable_data() {
    let frame = separable_frame(80);
    let model = Gbm::new()
        .ntrees(30)
        .min_rows(2)
        .distribution(Bernoulli)
        .seed(42)
        .build()
        .unwrap()
        .train(&frame, "y")
        .unwrap();

    let preds = model.predict(&frame).unwrap();
    let labels = preds.column("predict").unwrap();
    let expected: Vec<f64> = (0..80).map(|i| if i < 40 { 0.0 } else { 1.0 }).collect();
    assert!(accuracy(&expected, labels).unwrap() > 0.95);

    // Probability columns are complementary.
    let p0 = preds.column("p0").unwrap();
    let p1 = preds.column("p1").unwrap();
    for i in 0..preds.nrows() {
        assert_abs_diff_eq!(p0[i] + p1[i], 1.0, epsilon = 1e-12);
    }
}

#[test]
fn gaussian_fits_a_linear_trend() {
    let x: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 5.0).collect();

    let mut frame = Frame::new();
    frame.add_numeric("x", &x).unwrap();
    frame.add_numeric("y", &y).unwrap();

    let model = Gbm::new()
        .ntrees(60)
        .learn_rate(0.3)
        .min_rows(2)
        .distribution(Gaussian)
        .seed(7)
        .build()
        .unwrap()
        .train(&frame, "y")
        .unwrap();

    let preds = model.predict(&frame).unwrap();
    let fitted = preds.column("predict").unwrap();
    let mse = mean_squared_error(&y, &fitted.to_vec()).unwrap();
    // Trees are piecewise constant; demand a small residual relative to the
    // response range (5..205).
    assert!(mse < 4.0, "mse was {}", mse);
}

#[test]
fn ndarray_columns_are_accepted() {
    let x = Array1::from_vec((0..40).map(|i| i as f64).collect());
    let y = Array1::from_vec((0..40).map(|i| i as f64 * 0.5).collect());

    let mut frame = Frame::new();
    frame.add_numeric("x", &x).unwrap();
    frame.add_numeric("y", &y).unwrap();

    let model = Gbm::new()
        .ntrees(10)
        .min_rows(2)
        .seed(1)
        .build()
        .unwrap()
        .train(&frame, "y")
        .unwrap();
    assert_eq!(model.predict(&frame).unwrap().nrows(), 40);
}

#[test]
fn same_seed_reproduces_the_same_model() {
    let frame = separable_frame(60);
    let build = || {
        Gbm::new()
            .ntrees(20)
            .min_rows(2)
            .sample_rate(0.8)
            .seed(1234)
            .build()
            .unwrap()
            .train(&frame, "y")
            .unwrap()
    };

    let a = build();
    let b = build();
    assert_eq!(a.actual_ntrees(), b.actual_ntrees());
    expect_frames_match(
        &a.predict(&frame).unwrap(),
        &b.predict(&frame).unwrap(),
        1.0,
        DEFAULT_TOLERANCE,
    )
    .unwrap();
}

#[test]
fn parallel_and_sequential_cv_agree_on_synthetic_data() {
    // Same consistency check the loan test performs, on generated data.
    let frame = separable_frame(100);
    let configure = || {
        Gbm::new()
            .nfolds(4)
            .ntrees(40)
            .min_rows(2)
            .score_tree_interval(2)
            .stopping_rounds(3)
            .seed(99)
    };

    let sequential = configure().build().unwrap().train(&frame, "y").unwrap();
    let parallel = configure()
        .parallel(true)
        .build()
        .unwrap()
        .train(&frame, "y")
        .unwrap();

    assert_eq!(sequential.actual_ntrees(), parallel.actual_ntrees());
    expect_frames_match(
        &sequential.predict(&frame).unwrap(),
        &parallel.predict(&frame).unwrap(),
        1.0,
        DEFAULT_TOLERANCE,
    )
    .unwrap();
}

#[test]
fn predicting_with_a_missing_feature_column_fails() {
    let frame = separable_frame(40);
    let model = Gbm::new()
        .ntrees(5)
        .min_rows(2)
        .seed(3)
        .build()
        .unwrap()
        .train(&frame, "y")
        .unwrap();

    let mut partial = Frame::new();
    partial
        .add_numeric("x1", &vec![0.0, 1.0, 2.0])
        .unwrap();
    assert_eq!(
        model.predict(&partial).unwrap_err(),
        GbmError::UnknownColumn("x2".to_string())
    );
}

#[test]
fn categorical_features_are_encoded_by_label() {
    let grades = ["A", "B", "C", "A", "B", "C", "A", "B", "C", "A", "B", "C"];
    let x: Vec<f64> = (0..12).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..12).map(|i| if i < 6 { 0.0 } else { 1.0 }).collect();

    let mut frame = Frame::new();
    frame.add_categorical("grade", &grades).unwrap();
    frame.add_numeric("x", &x).unwrap();
    frame.add_numeric("y", &y).unwrap();
    frame.cast_categorical("y").unwrap();

    let model = Gbm::new()
        .ntrees(5)
        .min_rows(2)
        .seed(5)
        .build()
        .unwrap()
        .train(&frame, "y")
        .unwrap();

    let preds_same = model.predict(&frame).unwrap();
    assert_eq!(preds_same.nrows(), 12);
    assert_eq!(model.target_levels().unwrap(), &["0", "1"]);
}

#[test]
fn log_loss_orders_models_sensibly() {
    let actuals = vec![1.0, 0.0, 1.0, 0.0];
    let confident = vec![0.99, 0.01, 0.99, 0.01];
    let hedged = vec![0.6, 0.4, 0.6, 0.4];
    assert!(log_loss(&actuals, &confident).unwrap() < log_loss(&actuals, &hedged).unwrap());
}
