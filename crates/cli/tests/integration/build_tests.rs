//! `do`, `redo` and `redo-ifchange` integration tests.

use predicates::prelude::*;

use super::common::{BROKEN_C, HELLO_C, TestEnv, compiler_available};

#[test]
fn builds_all_by_default() {
  let env = TestEnv::new();
  env.write_file("all.do", "echo done > \"$3\"\n");

  env
    .do_cmd()
    .assert()
    .success()
    .stderr(predicate::str::contains("do  all"));

  assert_eq!(env.read("all"), "done\n");
  assert!(env.exists("all.did"));
  assert!(env.exists(".do_built"));
  assert!(env.exists(".do_built.dir/redo-ifchange"));
}

#[test]
fn builds_named_targets_in_order() {
  let env = TestEnv::new();
  env.write_file("a.do", "echo a >> order\n");
  env.write_file("b.do", "echo b >> order\n");

  env.do_cmd().arg("b").arg("a").assert().success();

  assert_eq!(env.read("order"), "b\na\n");
}

#[test]
fn failing_dofile_exits_non_zero() {
  let env = TestEnv::new();
  env.write_file("bad.do", "echo partial > \"$3\"\nexit 3\n");

  env
    .do_cmd()
    .arg("bad")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("do: bad: got exit code 3"));

  assert!(!env.exists("bad"));
  assert!(!env.exists("bad.redo.tmp"));
  assert!(!env.exists("bad.did"));
}

#[test]
fn killed_dofile_reports_signal_exit_code() {
  let env = TestEnv::new();
  env.write_file("all.do", "kill -9 $$\n");

  env
    .do_cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("do: all: got exit code 137"));

  assert!(!env.exists("all.did"));
  assert!(!env.exists("all.did.tmp"));
}

#[test]
fn missing_interpreter_is_an_error_without_leftovers() {
  let env = TestEnv::new();
  env.write_file("x.do", "#!/nonexistent/interp\n");

  let output = env.do_cmd().arg("x").assert().code(1).get_output().clone();
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(stderr.contains("do: error: failed to run /nonexistent/interp"));
  assert_eq!(stderr.matches("os error").count(), 1);
  assert!(!env.exists("x.did.tmp"));
  assert!(!env.exists("x.did"));
}

#[test]
fn missing_dofile_is_reported() {
  let env = TestEnv::new();
  env.write_file("sub/.keep", "");

  env
    .do_cmd()
    .arg("sub/nothing-builds-this.zz9")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no .do file"));
}

#[test]
fn second_run_is_incremental() {
  let env = TestEnv::new();
  env.write_file("count.do", "echo x >> runs\n: > \"$3\"\n");

  env.do_cmd().arg("count").assert().success();
  env
    .do_cmd()
    .arg("count")
    .assert()
    .success()
    .stderr(predicate::str::contains("Incremental mode"))
    .stderr(predicate::str::contains("do  count").not());

  assert_eq!(env.read("runs"), "x\n");
}

#[test]
fn clean_flag_rebuilds_everything() {
  let env = TestEnv::new();
  env.write_file("count.do", "echo x >> runs\n: > \"$3\"\n");

  env.do_cmd().arg("count").assert().success();
  env
    .do_cmd()
    .arg("-c")
    .arg("count")
    .assert()
    .success()
    .stderr(predicate::str::contains("Removing stamp files"));

  assert_eq!(env.read("runs"), "x\nx\n");
  assert!(env.exists("count"));
  assert!(!env.exists("count.did"));
}

#[test]
fn redo_always_rebuilds() {
  let env = TestEnv::new();
  env.write_file("count.do", "echo x >> runs\n: > \"$3\"\n");

  env.personality("redo").arg("count").assert().success();
  env.personality("redo").arg("count").assert().success();

  assert_eq!(env.read("runs"), "x\nx\n");
}

#[test]
fn nested_redo_ifchange_builds_dependency() {
  let env = TestEnv::new();
  env.write_file("all.do", "redo-ifchange lib/msg\ncat lib/msg > \"$3\"\n");
  env.write_file("lib/default.do", "echo \"hello from $1\" > \"$3\"\n");

  env
    .do_cmd()
    .assert()
    .success()
    .stderr(predicate::str::contains("do  all"))
    .stderr(predicate::str::contains("do    lib/msg"));

  assert_eq!(env.read("all"), "hello from msg\n");
  assert!(env.exists("lib/msg.did"));

  let log = env.read(".do_built");
  assert!(log.contains(&env.root.join("lib/msg").display().to_string()));
  assert!(log.contains(&env.root.join("all").display().to_string()));
}

#[test]
fn nested_failure_fails_parent() {
  let env = TestEnv::new();
  env.write_file("all.do", "redo-ifchange dep || exit 1\necho unreachable > \"$3\"\n");
  env.write_file("dep.do", "exit 5\n");

  env
    .do_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("dep: got exit code 5"))
    .stderr(predicate::str::contains("all: got exit code 1"));

  assert!(!env.exists("all"));
}

#[test]
fn stub_commands_are_no_ops() {
  let env = TestEnv::new();
  env.write_file("all.do", "redo-always\nredo-stamp < /dev/null\necho ok > \"$3\"\n");

  env.do_cmd().assert().success();
  assert_eq!(env.read("all"), "ok\n");
}

#[test]
fn shebang_dofile_runs_with_interpreter() {
  let env = TestEnv::new();
  env.write_file("out.do", "#!/bin/sh -e\nprintf '%s %s' \"$1\" \"$DO_DEPTH\" > \"$3\"\n");

  env.do_cmd().arg("out").assert().success();
  assert_eq!(env.read("out"), "out   ");
}

#[test]
fn jobs_flag_is_accepted() {
  let env = TestEnv::new();
  env.write_file("all.do", ": > \"$3\"\n");

  env.do_cmd().args(["-j", "4"]).assert().success();
}

#[test]
fn debug_flag_logs_skipped_targets() {
  let env = TestEnv::new();
  env.write_file("all.do", ": > \"$3\"\n");

  env.do_cmd().assert().success();
  env
    .do_cmd()
    .arg("-d")
    .assert()
    .success()
    .stderr(predicate::str::contains("all exists."));
}

#[test]
fn compiles_c_program_through_redo_cc() {
  if !compiler_available() {
    return;
  }

  let env = TestEnv::new();
  env.write_file("hello.c", HELLO_C);
  env.write_file("default.do", "redo-cc \"$1\" \"$2\" \"$3\"\n");

  env.do_cmd().arg("hello").assert().success();

  let status = std::process::Command::new(env.root.join("hello")).status().unwrap();
  assert!(status.success());
}

#[test]
fn compile_error_fails_build_without_output() {
  if !compiler_available() {
    return;
  }

  let env = TestEnv::new();
  env.write_file("broken.c", BROKEN_C);
  env.write_file("default.do", "redo-cc \"$1\" \"$2\" \"$3\"\n");

  env
    .do_cmd()
    .arg("broken")
    .assert()
    .failure()
    .stderr(predicate::str::contains("broken: got exit code"));

  assert!(!env.exists("broken"));
  assert!(!env.exists("broken.redo.tmp"));
}
