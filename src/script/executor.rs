/// Script executor: one construct → execute → snapshot cycle per call.
///
/// ## Contract
///   - A fresh `GameWorld` is built for every run; nothing carries over.
///   - Commands run synchronously in script order.
///   - Any fault (syntax, unknown function, thrown value, type error,
///     sandbox limit) is caught here and becomes `error: <diagnostic>`.
///     The path walked before the fault is kept as-is.
///   - The caller only ever receives a snapshot, never a fault.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

use crate::config::{GameConfig, GridConfig, ScriptConfig};
use crate::script::engine::{self, SharedWorld};
use crate::script::ScriptFault;
use crate::sim::snapshot::Snapshot;
use crate::sim::world::GameWorld;

#[derive(Clone, Debug)]
pub struct Executor {
    grid: GridConfig,
    limits: ScriptConfig,
}

impl Executor {
    pub fn new(config: &GameConfig) -> Self {
        Executor {
            grid: config.grid,
            limits: config.script,
        }
    }

    /// Run `source` against a fresh world and return its final state.
    pub fn run(&self, source: &str) -> Snapshot {
        let world: SharedWorld = Rc::new(RefCell::new(GameWorld::new(
            self.grid.size,
            self.grid.goal,
        )));

        if let Err(fault) = self.execute(&world, source) {
            warn!("script fault: {fault}");
            world.borrow_mut().fail(fault.to_string());
        }

        let (snapshot, size) = {
            let world = world.borrow();
            (world.snapshot(), world.size())
        };
        info!(
            "run finished on {0}x{0} grid: status={1}, {2} steps",
            size,
            snapshot.status,
            snapshot.path.len() - 1
        );
        snapshot
    }

    /// `run`, serialized for transport.
    pub fn run_json(&self, source: &str) -> serde_json::Result<String> {
        self.run(source).to_json()
    }

    fn execute(&self, world: &SharedWorld, source: &str) -> Result<(), ScriptFault> {
        let engine = engine::build(world, &self.limits);
        let ast = engine.compile(source)?;
        engine.run_ast(&ast)?;
        Ok(())
    }
}

impl Default for Executor {
    fn default() -> Self {
        Executor::new(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::Status;

    fn error_text(snap: &Snapshot) -> String {
        let wire = snap.status.to_string();
        assert!(wire.starts_with("error: "), "expected error, got {wire}");
        wire
    }

    #[test]
    fn scenario_a_right_then_down_wins() {
        let script = "
            move_right(); move_right(); move_right(); move_right();
            move_down(); move_down(); move_down(); move_down();
        ";
        let snap = Executor::default().run(script);
        assert_eq!(snap.status, Status::Win);
        assert_eq!((snap.x, snap.y), (4, 4));
        assert_eq!(snap.path.len(), 9);
        assert_eq!(snap.path.first(), Some(&(0, 0)));
        assert_eq!(snap.path.last(), Some(&(4, 4)));
    }

    #[test]
    fn scenario_b_first_move_up_crashes() {
        let snap = Executor::default().run("move_up();");
        assert_eq!(snap.status, Status::Crash);
        assert_eq!(snap.path, vec![(0, 0)]);
    }

    #[test]
    fn scenario_c_unknown_operation_is_error() {
        let snap = Executor::default().run("move_diagonal();");
        let text = error_text(&snap);
        assert!(text.contains("move_diagonal"), "{text}");
        assert_eq!(snap.path, vec![(0, 0)]);
    }

    #[test]
    fn fault_after_moves_keeps_walked_path() {
        let script = r#"
            move_right();
            move_down();
            throw "out of ideas";
            move_right();
        "#;
        let snap = Executor::default().run(script);
        let text = error_text(&snap);
        assert!(text.contains("out of ideas"), "{text}");
        assert_eq!(snap.path, vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!((snap.x, snap.y), (1, 1));
    }

    #[test]
    fn type_error_is_caught() {
        let snap = Executor::default().run(r#"move_right(); let n = true * 2;"#);
        error_text(&snap);
        assert_eq!(snap.path, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn wrong_arity_is_caught() {
        let snap = Executor::default().run("move_right(3);");
        error_text(&snap);
        assert_eq!(snap.path, vec![(0, 0)]);
    }

    #[test]
    fn syntax_error_runs_nothing() {
        let snap = Executor::default().run("move_right(); move_down(");
        let text = error_text(&snap);
        assert!(text.starts_with("error: syntax error:"), "{text}");
        assert_eq!(snap.path, vec![(0, 0)]);
    }

    #[test]
    fn loops_and_functions_are_allowed() {
        let script = "
            fn walk(n) {
                for i in 0..n {
                    move_right();
                }
            }
            walk(4);
            let steps = 0;
            while steps < 4 {
                move_down();
                steps += 1;
            }
        ";
        let snap = Executor::default().run(script);
        assert_eq!(snap.status, Status::Win);
        assert_eq!(snap.path.len(), 9);
    }

    #[test]
    fn moves_after_win_are_ignored() {
        let script = "
            for i in 0..4 { move_right(); }
            for i in 0..4 { move_down(); }
            move_up();
            move_left();
        ";
        let snap = Executor::default().run(script);
        assert_eq!(snap.status, Status::Win);
        assert_eq!((snap.x, snap.y), (4, 4));
        assert_eq!(snap.path.len(), 9);
    }

    #[test]
    fn runaway_loop_hits_operation_limit() {
        let config = GameConfig::from_toml_str("[script]\nmax_operations = 5000\n").unwrap();
        let snap = Executor::new(&config).run("loop { move_right(); move_left(); }");
        error_text(&snap);
        assert!(snap.path.len() > 1);
    }

    #[test]
    fn runaway_loop_after_crash_stays_crash() {
        let config = GameConfig::from_toml_str("[script]\nmax_operations = 5000\n").unwrap();
        let snap = Executor::new(&config).run("loop { move_up(); }");
        assert_eq!(snap.status, Status::Crash);
        assert_eq!(snap.path, vec![(0, 0)]);
    }

    #[test]
    fn import_cannot_load_host_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("walk.rhai"), "move_right(); move_right();").unwrap();
        let module = dir.path().join("walk").to_string_lossy().into_owned();

        let snap = Executor::default().run(&format!("import {module:?} as w;"));
        error_text(&snap);
        assert_eq!(snap.path, vec![(0, 0)]);
        assert_eq!((snap.x, snap.y), (0, 0));
    }

    #[test]
    fn deep_recursion_is_caught() {
        let snap = Executor::default().run("fn f(n) { f(n + 1) } f(0);");
        error_text(&snap);
    }

    #[test]
    fn empty_script_stays_running() {
        let snap = Executor::default().run("");
        assert_eq!(snap.status, Status::Running);
        assert_eq!(snap.path, vec![(0, 0)]);
    }

    #[test]
    fn runs_share_no_state() {
        let exec = Executor::default();
        let first = exec.run("move_right(); move_right();");
        let second = exec.run("move_down();");
        assert_eq!(first.path, vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(second.path, vec![(0, 0), (0, 1)]);
        let again = exec.run("move_right(); move_right();");
        assert_eq!(again, first);
    }

    #[test]
    fn custom_grid_is_used() {
        let config = GameConfig::from_toml_str("[grid]\nsize = 3\ngoal = [2, 0]\n").unwrap();
        let snap = Executor::new(&config).run("move_right(); move_right();");
        assert_eq!(snap.goal, (2, 0));
        assert_eq!(snap.status, Status::Win);
        let snap = Executor::new(&config).run("move_down(); move_down(); move_down();");
        assert_eq!(snap.status, Status::Crash);
        assert_eq!(snap.path, vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn run_json_reports_error_prefix() {
        let json = Executor::default().run_json("nope();").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let status = value["status"].as_str().unwrap();
        assert!(status.starts_with("error: "), "{status}");
        assert_eq!(value["path"], serde_json::json!([[0, 0]]));
    }
}
