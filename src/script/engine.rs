/// Sandboxed Rhai engine bound to a single world.
///
/// The only host functions a script can reach are the four move entry
/// points (`move_up`, `move_down`, `move_left`, `move_right`). `eval` is
/// disabled, `import` resolves nothing, `print`/`debug` go to the log, and
/// every run is bounded by the limits in `ScriptConfig`.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use rhai::module_resolvers::DummyModuleResolver;
use rhai::Engine;

use crate::config::ScriptConfig;
use crate::domain::direction::Direction;
use crate::sim::world::GameWorld;

pub type SharedWorld = Rc<RefCell<GameWorld>>;

pub fn build(world: &SharedWorld, limits: &ScriptConfig) -> Engine {
    let mut engine = Engine::new();
    engine.set_module_resolver(DummyModuleResolver::new());
    engine.set_max_operations(limits.max_operations);
    engine.set_max_call_levels(limits.max_call_levels);
    engine.set_max_expr_depths(limits.max_expr_depth, limits.max_expr_depth);
    engine.set_max_string_size(limits.max_string_size);
    engine.set_max_array_size(limits.max_array_size);
    engine.set_max_map_size(limits.max_array_size);
    engine.disable_symbol("eval");

    engine.on_print(|text| debug!(target: "script", "{text}"));
    engine.on_debug(|text, _source, pos| debug!(target: "script", "[{pos}] {text}"));

    for dir in Direction::ALL {
        let world = Rc::clone(world);
        let mutate = GameWorld::mutator(dir);
        engine.register_fn(dir.entry_point(), move || {
            mutate(&mut world.borrow_mut());
        });
    }

    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn shared() -> SharedWorld {
        Rc::new(RefCell::new(GameWorld::default()))
    }

    #[test]
    fn entry_points_drive_the_bound_world() {
        let world = shared();
        let engine = build(&world, &GameConfig::default().script);
        engine
            .run("move_right(); move_down(); move_right();")
            .expect("script should run");
        assert_eq!(world.borrow().path(), &[(0, 0), (1, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn engines_do_not_share_worlds() {
        let a = shared();
        let b = shared();
        let limits = GameConfig::default().script;
        build(&a, &limits).run("move_down();").unwrap();
        build(&b, &limits).run("move_right(); move_right();").unwrap();
        assert_eq!(a.borrow().position(), (0, 1));
        assert_eq!(b.borrow().position(), (2, 0));
    }

    #[test]
    fn eval_is_rejected() {
        let world = shared();
        let engine = build(&world, &GameConfig::default().script);
        assert!(engine.run(r#"eval("move_right()");"#).is_err());
        assert_eq!(world.borrow().path(), &[(0, 0)]);
    }

    #[test]
    fn print_does_not_fail() {
        let world = shared();
        let engine = build(&world, &GameConfig::default().script);
        engine.run(r#"print("hello"); debug(42); move_right();"#).unwrap();
        assert_eq!(world.borrow().position(), (1, 0));
    }
}
