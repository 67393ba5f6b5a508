use fastBoost::prelude::*;

const LOAN_CSV: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../assets/lending-club/loan.csv"
);

fn loan_frame() -> Frame {
    let mut frame = Frame::from_csv_path(LOAN_CSV).unwrap();
    frame.cast_categorical("bad_loan").unwrap();
    frame
}

fn loan_gbm() -> GbmBuilder {
    Gbm::new()
        .nfolds(5)
        .distribution(Bernoulli)
        .ntrees(500)
        .score_tree_interval(3)
        .stopping_rounds(2)
        .seed(42)
}

#[test] // Parallel CV fold building must match the sequential default exactly
fn cv_nfolds_gbm_parallel_matches_sequential() {
    let _ = env_logger::builder().is_test(true).try_init();
    let frame = loan_frame();

    let model_parallel = loan_gbm()
        .parallel(true)
        .build()
        .unwrap()
        .train(&frame, "bad_loan")
        .unwrap();
    let preds_parallel = model_parallel.predict(&frame).unwrap();

    let model_sequential = loan_gbm()
        .build()
        .unwrap()
        .train(&frame, "bad_loan")
        .unwrap();
    let preds_sequential = model_sequential.predict(&frame).unwrap();

    println!("parallel trees:   {}", model_parallel.actual_ntrees());
    println!("sequential trees: {}", model_sequential.actual_ntrees());

    assert_eq!(
        model_parallel.actual_ntrees(),
        model_sequential.actual_ntrees()
    );
    expect_frames_match(&preds_parallel, &preds_sequential, 1.0, DEFAULT_TOLERANCE).unwrap();
}

#[test]
fn fold_outcomes_match_across_modes() {
    let frame = loan_frame();

    let parallel = loan_gbm()
        .parallel(true)
        .build()
        .unwrap()
        .train(&frame, "bad_loan")
        .unwrap();
    let sequential = loan_gbm()
        .build()
        .unwrap()
        .train(&frame, "bad_loan")
        .unwrap();

    let cv_par = parallel.cv_summary().unwrap();
    let cv_seq = sequential.cv_summary().unwrap();
    assert_eq!(cv_par.fold_ntrees, cv_seq.fold_ntrees);
    assert_eq!(cv_par.fold_metrics, cv_seq.fold_metrics);
    assert_eq!(cv_par.fold_ntrees.len(), 5);
}

#[test]
fn early_stopping_cuts_below_the_tree_budget() {
    let frame = loan_frame();
    let model = loan_gbm()
        .build()
        .unwrap()
        .train(&frame, "bad_loan")
        .unwrap();
    // The lending fixture is noisy; 500 trees must not survive stopping.
    assert!(model.actual_ntrees() < 500);
    assert!(model.actual_ntrees() >= 1);
}

#[test]
fn failed_parallel_training_leaves_no_residue() {
    let frame = loan_frame();

    let baseline = loan_gbm()
        .build()
        .unwrap()
        .train(&frame, "bad_loan")
        .unwrap();
    let baseline_preds = baseline.predict(&frame).unwrap();

    // A parallel training attempt that fails mid-request: the response was
    // never cast, so Bernoulli rejects it.
    let uncast = Frame::from_csv_path(LOAN_CSV).unwrap();
    let err = loan_gbm()
        .parallel(true)
        .build()
        .unwrap()
        .train(&uncast, "bad_loan")
        .unwrap_err();
    assert!(matches!(err, GbmError::InvalidInput(_)));

    // The failure cannot have leaked any execution-mode state: a fresh
    // sequential training still reproduces the baseline bit for bit.
    let after = loan_gbm()
        .build()
        .unwrap()
        .train(&frame, "bad_loan")
        .unwrap();
    assert_eq!(after.actual_ntrees(), baseline.actual_ntrees());
    let after_preds = after.predict(&frame).unwrap();
    expect_frames_match(&after_preds, &baseline_preds, 1.0, DEFAULT_TOLERANCE).unwrap();
}

#[test]
fn parallel_mode_is_scoped_to_its_own_request() {
    let frame = loan_frame();

    // Interleave construction so any hidden shared state would be visible.
    let trainer_parallel = loan_gbm().parallel(true).build().unwrap();
    let trainer_sequential = loan_gbm().build().unwrap();

    let from_parallel = trainer_parallel.train(&frame, "bad_loan").unwrap();
    let from_sequential = trainer_sequential.train(&frame, "bad_loan").unwrap();

    expect_frames_match(
        &from_parallel.predict(&frame).unwrap(),
        &from_sequential.predict(&frame).unwrap(),
        1.0,
        DEFAULT_TOLERANCE,
    )
    .unwrap();
}
