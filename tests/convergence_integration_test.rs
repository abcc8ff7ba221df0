//! Convergence loop and analysis pipeline behavior against a scripted model.

mod common;

use std::io::{Cursor, Read};

use common::{analysis, python_project, zip_of, ScriptedModel};
use shipwright::domain::errors::{AnalysisError, ModelError};
use shipwright::domain::models::{AnalysisConfig, ConvergenceReason, FixKind, ProjectFileSet};
use shipwright::services::{reconcile, ConvergenceLoop, PromptAssembler};
use shipwright::AnalysisPipeline;

fn convergence_loop(model: std::sync::Arc<ScriptedModel>) -> ConvergenceLoop {
    ConvergenceLoop::new(model, PromptAssembler::default(), 3)
}

#[tokio::test]
async fn test_fix_then_empty_batch_makes_two_calls() {
    let model = ScriptedModel::new(vec![
        Ok(analysis("first", &[("app.py", "print(2)")])),
        Ok(analysis("second", &[])),
    ]);
    let original = python_project();

    let outcome = convergence_loop(model.clone()).run(&original).await.unwrap();

    assert_eq!(model.calls(), 2);
    assert_eq!(outcome.model_calls, 2);
    assert_eq!(outcome.reason, ConvergenceReason::NoFixesProposed);
    assert_eq!(outcome.files.get("app.py"), Some("print(2)"));
    assert_eq!(outcome.draft.explanation, "second");

    let fixes = reconcile(&original, &outcome.files);
    assert_eq!(fixes.len(), 1);
    assert_eq!(fixes[0].file_name, "app.py");
    assert_eq!(fixes[0].kind, FixKind::Modified);
    assert_eq!(fixes[0].suggested_code, "print(2)");
}

#[tokio::test]
async fn test_second_iteration_sees_first_iteration_fixes() {
    let model = ScriptedModel::new(vec![
        Ok(analysis("first", &[("app.py", "print(2)")])),
        Ok(analysis("second", &[])),
    ]);

    convergence_loop(model.clone()).run(&python_project()).await.unwrap();

    let prompts = model.prompts();
    let second = prompts[1]
        .files
        .iter()
        .find(|f| f.path == "app.py")
        .unwrap();
    assert_eq!(second.content, "print(2)");
}

#[tokio::test]
async fn test_empty_first_batch_keeps_that_draft() {
    let model = ScriptedModel::new(vec![
        Ok(analysis("only", &[])),
        Ok(analysis("never", &[("app.py", "print(3)")])),
    ]);
    let original = python_project();

    let outcome = convergence_loop(model.clone()).run(&original).await.unwrap();

    assert_eq!(model.calls(), 1);
    assert_eq!(outcome.draft.explanation, "only");
    assert_eq!(outcome.files, original);
    assert!(reconcile(&original, &outcome.files).is_empty());
}

#[tokio::test]
async fn test_repeated_identical_batch_stops_loop() {
    let model = ScriptedModel::new(vec![
        Ok(analysis("a", &[("app.py", "print(2)")])),
        Ok(analysis("b", &[("app.py", "print(2)")])),
        Ok(analysis("c", &[("app.py", "print(3)")])),
    ]);

    let outcome = convergence_loop(model.clone()).run(&python_project()).await.unwrap();

    assert_eq!(model.calls(), 2);
    assert_eq!(outcome.reason, ConvergenceReason::NoEffectiveChanges);
    assert_eq!(outcome.draft.explanation, "b");
    assert_eq!(outcome.files.get("app.py"), Some("print(2)"));
}

#[tokio::test]
async fn test_never_more_than_three_calls() {
    let model = ScriptedModel::new(vec![
        Ok(analysis("a", &[("app.py", "print(2)")])),
        Ok(analysis("b", &[("app.py", "print(3)")])),
        Ok(analysis("c", &[("app.py", "print(4)")])),
        Ok(analysis("d", &[("app.py", "print(5)")])),
    ]);

    let outcome = ConvergenceLoop::new(model.clone(), PromptAssembler::default(), 10)
        .run(&python_project())
        .await
        .unwrap();

    assert_eq!(model.calls(), 3);
    assert_eq!(outcome.reason, ConvergenceReason::IterationBudgetExhausted);
    assert_eq!(outcome.draft.explanation, "c");
    assert_eq!(outcome.files.get("app.py"), Some("print(4)"));
}

#[tokio::test]
async fn test_schema_failure_on_second_call_fails_run() {
    let model = ScriptedModel::new(vec![
        Ok(analysis("a", &[("app.py", "print(2)")])),
        Err(ModelError::Schema {
            reason: "missing field `renderYaml`".to_string(),
            raw: "{}".to_string(),
        }),
    ]);

    let err = convergence_loop(model).run(&python_project()).await.unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::ModelSchema { iteration: 1, ref raw, .. } if raw == "{}"
    ));
}

#[tokio::test]
async fn test_traversal_paths_are_skipped_not_applied() {
    let model = ScriptedModel::new(vec![
        Ok(analysis(
            "a",
            &[("../../etc/passwd", "root"), ("requirements.txt", "flask\ngunicorn\n")],
        )),
        Ok(analysis("b", &[])),
    ]);
    let original = python_project();

    let outcome = convergence_loop(model).run(&original).await.unwrap();

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].raw_file_name, "../../etc/passwd");
    assert!(outcome.files.paths().all(|p| !p.contains("..")));

    let fixes = reconcile(&original, &outcome.files);
    assert_eq!(fixes.len(), 1);
    assert_eq!(fixes[0].file_name, "requirements.txt");
    assert_eq!(fixes[0].kind, FixKind::Added);
}

#[tokio::test]
async fn test_pipeline_rejects_archive_without_replit_before_calling_model() {
    let model = ScriptedModel::new(vec![Ok(analysis("a", &[]))]);
    let pipeline = AnalysisPipeline::new(model.clone(), &AnalysisConfig::default());
    let bytes = zip_of(&[("app.py", b"print(1)")]);

    let err = pipeline.analyze_archive("app.zip", &bytes).await.unwrap_err();

    assert!(matches!(err, AnalysisError::PreconditionMissing { ref file } if file == ".replit"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_pipeline_end_to_end_writes_fixed_archive() {
    let model = ScriptedModel::new(vec![
        Ok(analysis("web", &[("app.py", "print(2)"), ("Procfile", "web: gunicorn app:app")])),
        Ok(analysis("web", &[])),
    ]);
    let pipeline = AnalysisPipeline::new(model, &AnalysisConfig::default());
    let bytes = zip_of(&[
        ("my-app/", b""),
        ("my-app/.replit", b"run = \"python app.py\"\n"),
        ("my-app/app.py", b"print(1)"),
        ("my-app/legacy.py", b"old"),
    ]);

    let report = pipeline.analyze_archive("uploads/my-app.zip", &bytes).await.unwrap();

    assert_eq!(report.fixed_archive_name, "my-app-fixed.zip");
    assert_eq!(report.model_calls, 2);
    assert!(report.manifest_warning.is_none());

    let mut kinds: Vec<(String, FixKind)> = report
        .plan
        .suggested_fixes
        .iter()
        .map(|f| (f.file_name.clone(), f.kind))
        .collect();
    kinds.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        kinds,
        vec![
            ("Procfile".to_string(), FixKind::Added),
            ("app.py".to_string(), FixKind::Modified),
        ]
    );

    let mut archive = zip::ZipArchive::new(Cursor::new(report.fixed_archive.clone())).unwrap();
    let mut manifest = String::new();
    archive
        .by_name("render.yaml")
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    assert_eq!(manifest, report.plan.render_yaml);
    assert!(archive.by_name("legacy.py").is_ok());
    assert!(archive.by_name("my-app/app.py").is_err());

    let shipped: ProjectFileSet = report.shipped_files();
    assert_eq!(shipped.get("render.yaml"), Some(report.plan.render_yaml.as_str()));
}
