//! End-to-end tests for the dry-run report engine.

use dryrun_report::{analyze_log, EngineError, Patterns, PrState, RawPatternConfig};

/// Pattern config covering the whole fixture log format. The `%TS%`
/// placeholder expands to an optional `[timestamp]` prefix in every pattern
/// that carries it.
fn fixture_config_json(autoclosed_offset: usize) -> String {
  format!(
    r#"{{
    "branches_info_start_pattern": "^%TS%START\\(repo: ",
    "branches_info_end_pattern": "^%TS%END$",
    "repository_name_pattern": "START\\(repo: ([^)]+)\\)",
    "timestamp_base_pattern": "(\\[[^\\]]*\\]\\s*)?",
    "timestamp_base_pattern_placeholder": "%TS%",
    "timestamp_pattern": "^\\[[^\\]]*\\]\\s*",
    "dry_run_info_pattern_general": "^%TS%DRY-RUN repository=\"(?P<repository_name>[^\"]+)\" branch=\"(?P<branch_name>[^\"]+)\" info=\"(?P<info>[^\"]+)\"",
    "dry_run_info_pattern_autoclosed": "^%TS%AUTOCLOSE repository=\"(?P<repository_name>[^\"]+)\"",
    "dry_run_info_autoclosed_pr_title_line_number": {autoclosed_offset},
    "dry_run_info_autoclosed_pr_title_pattern": "^%TS%TITLE \"(?P<pr_title>[^\"]+)\"",
    "updated_branch_pattern": "^Branch updated",
    "created_branch_pattern": "^Branch created",
    "commited_files_pattern": "^Committed files"
}}"#
  )
}

fn patterns(autoclosed_offset: usize) -> Patterns {
  let raw = RawPatternConfig::from_json(&fixture_config_json(autoclosed_offset)).unwrap();
  Patterns::compile(&raw).unwrap()
}

#[test]
fn scenario_a_single_branch_pr_created() {
  let log = "START(repo: X)\n\
             \"branchesInformation\":[{\"branchName\":\"b1\",\"prTitle\":\"t1\",\"result\":\"pr-created\",\"upgrades\":[{\"packageName\":\"p\",\"currentVersion\":\"1.0\",\"newVersion\":\"2.0\"}]}]\n\
             END\n";
  let report = analyze_log(log, &patterns(0)).unwrap();

  assert_eq!(report.repositories.len(), 1);
  assert_eq!(report.repositories[0].repository, "X");
  let branch = &report.repositories[0].branches[0];
  assert_eq!(branch.branch_name.as_deref(), Some("b1"));
  assert_eq!(branch.title.as_deref(), Some("t1"));
  assert_eq!(branch.state, PrState::New);
  assert_eq!(branch.detail, "");

  let upgrade = branch.primary_upgrade().unwrap();
  assert_eq!(upgrade.package_name.as_deref(), Some("p"));
  assert_eq!(upgrade.current_version.as_deref(), Some("1.0"));
  assert_eq!(upgrade.new_version.as_deref(), Some("2.0"));
  assert!(branch.auxiliary_upgrades().is_empty());
}

#[test]
fn scenario_b_done_without_evidence_is_unchanged() {
  let log = "START(repo: X)\n\
             \"branchesInformation\":[{\"prTitle\":\"t1\",\"result\":\"done\"}]\n\
             END\n";
  let report = analyze_log(log, &patterns(0)).unwrap();
  let branch = &report.repositories[0].branches[0];
  assert_eq!(branch.state, PrState::Unchanged);
  assert_eq!(branch.detail, "");
}

#[test]
fn scenario_c_error_joins_info_lines() {
  let log = "DRY-RUN repository=\"X\" branch=\"t1\" info=\"disk full\"\n\
             DRY-RUN repository=\"X\" branch=\"t1\" info=\"retry failed\"\n\
             START(repo: X)\n\
             \"branchesInformation\":[{\"prTitle\":\"t1\",\"result\":\"error\"}]\n\
             END\n";
  let report = analyze_log(log, &patterns(0)).unwrap();
  let branch = &report.repositories[0].branches[0];
  assert_eq!(branch.state, PrState::Error);
  assert_eq!(branch.detail, "disk full<br>retry failed");
}

#[test]
fn scenario_d_autoclosed_title_not_found_at_offset() {
  let log = "some line\n\
             AUTOCLOSE repository=\"X\"\n\
             filler one\n\
             filler two\n\
             definitely not a title\n";
  let err = analyze_log(log, &patterns(2)).unwrap_err();
  match err {
    EngineError::AutoclosedTitleNotFound { offset, line } => {
      assert_eq!(offset, 2);
      assert_eq!(line, "definitely not a title");
    }
    other => panic!("expected AutoclosedTitleNotFound, got {other:?}"),
  }
}

#[test]
fn scenario_e_unterminated_section_names_repository() {
  let log = "START(repo: lonely)\n\"branchesInformation\":[]\n";
  let err = analyze_log(log, &patterns(0)).unwrap_err();
  match err {
    EngineError::UnterminatedSection { repository } => assert_eq!(repository, "lonely"),
    other => panic!("expected UnterminatedSection, got {other:?}"),
  }
}

#[test]
fn timestamped_log_lines_are_handled_end_to_end() {
  let log = "[2025-06-24T10:41:40.220Z] START(repo: X)\n\
             [2025-06-24T10:41:40.221Z] \"branchesInformation\":[\n\
             [2025-06-24T10:41:40.222Z] {\"branchName\":\"b1\",\"prTitle\":\"t1\",\"result\":\"pr-created\"}\n\
             [2025-06-24T10:41:40.223Z] ]\n\
             [2025-06-24T10:41:40.224Z] END\n";
  let report = analyze_log(log, &patterns(0)).unwrap();
  assert_eq!(report.repositories[0].repository, "X");
  assert_eq!(report.repositories[0].branches[0].state, PrState::New);
}

#[test]
fn autoclosed_branches_are_appended_as_discarded() {
  let log = "START(repo: real)\n\
             \"branchesInformation\":[{\"prTitle\":\"t1\",\"result\":\"pr-created\"}]\n\
             END\n\
             AUTOCLOSE repository=\"gone\"\n\
             TITLE \"Update abandoned dep\"\n";
  let report = analyze_log(log, &patterns(0)).unwrap();

  assert_eq!(report.repositories.len(), 2);
  assert_eq!(report.repositories[0].repository, "real");
  assert_eq!(report.repositories[1].repository, "gone");
  let auto = &report.repositories[1].branches[0];
  assert_eq!(auto.title.as_deref(), Some("Update abandoned dep"));
  assert_eq!(auto.state, PrState::Discarded);
  assert_eq!(auto.detail, "PR would be discarded");
}

#[test]
fn done_drilldown_uses_dry_run_evidence() {
  let log = "DRY-RUN repository=\"X\" branch=\"updated pr\" info=\"Branch updated some/branch\"\n\
             DRY-RUN repository=\"X\" branch=\"created pr\" info=\"Branch created some/branch\"\n\
             DRY-RUN repository=\"X\" branch=\"rebased pr\" info=\"Committed files to branch\"\n\
             START(repo: X)\n\
             \"branchesInformation\":[\n\
             {\"prTitle\":\"updated pr\",\"result\":\"done\"},\n\
             {\"prTitle\":\"created pr\",\"result\":\"done\"},\n\
             {\"prTitle\":\"rebased pr\",\"result\":\"done\"}\n\
             ]\n\
             END\n";
  let report = analyze_log(log, &patterns(0)).unwrap();
  let branches = &report.repositories[0].branches;
  assert_eq!(branches[0].state, PrState::Updated);
  assert_eq!(branches[1].state, PrState::New);
  assert_eq!(branches[2].state, PrState::Unchanged);
}

#[test]
fn unknown_result_code_is_reported_with_marker() {
  let log = "START(repo: X)\n\
             \"branchesInformation\":[{\"prTitle\":\"t1\",\"result\":\"shiny-new-code\"}]\n\
             END\n";
  let report = analyze_log(log, &patterns(0)).unwrap();
  let branch = &report.repositories[0].branches[0];
  assert_eq!(branch.state, PrState::Unknown);
  assert!(branch.detail.starts_with("Unknown PR state"));
}

#[test]
fn empty_log_is_fatal() {
  let err = analyze_log("", &patterns(0)).unwrap_err();
  assert!(matches!(err, EngineError::EmptyLog));
}

#[test]
fn pipeline_is_deterministic() {
  let log = "DRY-RUN repository=\"X\" branch=\"t1\" info=\"Branch updated some/branch\"\n\
             START(repo: X)\n\
             \"branchesInformation\":[{\"prTitle\":\"t1\",\"result\":\"done\",\"upgrades\":[{\"packageName\":\"p\",\"currentVersion\":\"1\",\"newVersion\":\"2\"}]}]\n\
             END\n\
             AUTOCLOSE repository=\"gone\"\n\
             TITLE \"abandoned\"\n";
  let p = patterns(0);
  let first = analyze_log(log, &p).unwrap();
  let second = analyze_log(log, &p).unwrap();
  assert_eq!(first, second);
  assert_eq!(
    dryrun_report::html::render(&first),
    dryrun_report::html::render(&second)
  );
}

#[test]
fn section_body_parse_failure_names_repository() {
  let log = "START(repo: broken)\nthis is not json\nEND\n";
  let err = analyze_log(log, &patterns(0)).unwrap_err();
  match err {
    EngineError::SectionBodyParse { repository, .. } => assert_eq!(repository, "broken"),
    other => panic!("expected SectionBodyParse, got {other:?}"),
  }
}
