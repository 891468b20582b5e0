// src/reflector_tests.rs
#[cfg(test)]
mod tests {
    use crate::{
        functor, handler, DuplicatePolicy, HandlerSet, Property, Reflect, ReflectError, Reflector,
        Summary, ValueType, Visit,
    };
    use std::cell::{Cell, RefCell};

    // A thermostat with every kind of property
    #[derive(Debug)]
    struct Thermostat {
        label: String,
        target: f64,
        fan_speed: u8,
        enabled: bool,
    }

    impl Thermostat {
        fn new() -> Self {
            Self {
                label: "hallway".to_string(),
                target: 20.5,
                fan_speed: 2,
                enabled: true,
            }
        }

        fn fan_speed(&self) -> u8 {
            self.fan_speed
        }

        // Speeds above 5 are rejected
        fn set_fan_speed(&mut self, speed: u8) {
            if speed <= 5 {
                self.fan_speed = speed;
            }
        }
    }

    impl Reflect for Thermostat {
        fn reflect<H: HandlerSet>(&mut self, handlers: H) {
            let mut r = Reflector::new(self, handlers);
            r.visit_ref("Label", |t| &mut t.label);
            r.visit_fn("Target", |t| t.target, |t, v| t.target = v);
            r.visit_method("Fan Speed", Thermostat::fan_speed, Thermostat::set_fan_speed);
            r.visit_ref("Enabled", |t| &mut t.enabled);
        }
    }

    #[test]
    fn test_properties_offered_in_declaration_order() {
        let mut thermostat = Thermostat::new();
        let seen = RefCell::new(Vec::new());

        thermostat.reflect((
            handler(|name: &str, _: Property<bool>| seen.borrow_mut().push(name.to_string())),
            handler(|name: &str, _: Property<u8>| seen.borrow_mut().push(name.to_string())),
            handler(|name: &str, _: Property<f64>| seen.borrow_mut().push(name.to_string())),
            handler(|name: &str, _: Property<String>| seen.borrow_mut().push(name.to_string())),
        ));

        assert_eq!(
            seen.into_inner(),
            vec!["Label", "Target", "Fan Speed", "Enabled"]
        );
    }

    #[test]
    fn test_writes_land_on_target() {
        let mut thermostat = Thermostat::new();

        thermostat.reflect((
            handler(|_: &str, mut p: Property<String>| p.set(format!("{} (upstairs)", p.get()))),
            handler(|_: &str, mut p: Property<f64>| p.update(|t| t + 1.0)),
            handler(|_: &str, mut p: Property<bool>| p.set(false)),
        ));

        assert_eq!(thermostat.label, "hallway (upstairs)");
        assert_eq!(thermostat.target, 21.5);
        assert!(!thermostat.enabled);
        assert_eq!(thermostat.fan_speed, 2);
    }

    #[test]
    fn test_validating_setter_rejects() {
        let mut thermostat = Thermostat::new();

        thermostat.reflect((handler(|_: &str, mut p: Property<u8>| p.set(9)),));
        assert_eq!(thermostat.fan_speed, 2);

        thermostat.reflect((handler(|_: &str, mut p: Property<u8>| p.set(4)),));
        assert_eq!(thermostat.fan_speed, 4);
    }

    #[test]
    fn test_empty_handler_set_changes_nothing() {
        let mut thermostat = Thermostat::new();
        thermostat.reflect(());

        assert_eq!(thermostat.label, "hallway");
        assert_eq!(thermostat.target, 20.5);
        assert_eq!(thermostat.fan_speed, 2);
        assert!(thermostat.enabled);
    }

    #[test]
    fn test_visit_reports_dispatch_and_skip() {
        let mut thermostat = Thermostat::new();
        let mut r = Reflector::new(&mut thermostat, (handler(|_: &str, _: Property<u8>| {}),));

        assert_eq!(r.visit_ref("Label", |t| &mut t.label), Visit::Skipped);
        assert_eq!(
            r.visit_method("Fan Speed", Thermostat::fan_speed, Thermostat::set_fan_speed),
            Visit::Dispatched
        );
        assert_eq!(r.visit_fn("Target", |t| t.target, |t, v| t.target = v), Visit::Skipped);
        assert_eq!(
            r.summary(),
            Summary {
                dispatched: 1,
                skipped: 2
            }
        );
    }

    #[test]
    fn test_detached_functor_and_accessor() {
        let mut thermostat = Thermostat::new();
        let outside = Cell::new(7i16);
        let mut limit = 3usize;

        {
            let mut r = Reflector::new(
                &mut thermostat,
                (
                    handler(|_: &str, mut p: Property<i16>| p.update(|v| -v)),
                    handler(|_: &str, mut p: Property<usize>| p.set(p.get() * 2)),
                ),
            );
            assert_eq!(
                r.visit_functor("Outside", || outside.get(), |v| outside.set(v)),
                Visit::Dispatched
            );
            assert_eq!(
                r.visit_accessor("Limit", crate::slot(&mut limit)),
                Visit::Dispatched
            );
        }

        assert_eq!(outside.get(), -7);
        assert_eq!(limit, 6);
    }

    #[test]
    fn test_first_handler_for_type_wins() {
        let mut thermostat = Thermostat::new();
        let calls = RefCell::new(Vec::new());

        thermostat.reflect((
            handler(|name: &str, _: Property<bool>| {
                calls.borrow_mut().push(format!("first {name}"))
            }),
            handler(|name: &str, _: Property<bool>| {
                calls.borrow_mut().push(format!("second {name}"))
            }),
        ));

        assert_eq!(calls.into_inner(), vec!["first Enabled".to_string()]);
    }

    #[test]
    fn test_policy_reject_fails_before_dispatch() {
        let mut thermostat = Thermostat::new();
        let calls = Cell::new(0);
        let handlers = (
            handler(|_: &str, _: Property<String>| calls.set(calls.get() + 1)),
            handler(|_: &str, _: Property<u8>| calls.set(calls.get() + 1)),
            handler(|_: &str, _: Property<String>| calls.set(calls.get() + 1)),
        );

        let result = Reflector::with_policy(&mut thermostat, handlers, DuplicatePolicy::Reject);
        assert!(matches!(
            result,
            Err(ReflectError::DuplicateHandler(t)) if t == ValueType::of::<String>()
        ));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_policy_shadow_and_warn_still_dispatch() -> Result<(), ReflectError> {
        for policy in [DuplicatePolicy::Shadow, DuplicatePolicy::Warn] {
            let mut thermostat = Thermostat::new();
            let handlers = (
                handler(|_: &str, mut p: Property<f64>| p.set(18.0)),
                handler(|_: &str, mut p: Property<f64>| p.set(25.0)),
            );

            let mut r = Reflector::with_policy(&mut thermostat, handlers, policy)?;
            r.visit_fn("Target", |t| t.target, |t, v| t.target = v);
            drop(r);

            assert_eq!(thermostat.target, 18.0);
        }
        Ok(())
    }

    #[test]
    fn test_policy_warn_with_several_duplicated_types() -> Result<(), ReflectError> {
        let mut thermostat = Thermostat::new();
        let handlers = (
            handler(|_: &str, mut p: Property<u8>| p.set(4)),
            handler(|_: &str, mut p: Property<u8>| p.set(3)),
            handler(|_: &str, _: Property<i32>| {}),
            handler(|_: &str, _: Property<i32>| {}),
        );

        let mut r = Reflector::with_policy(&mut thermostat, handlers, DuplicatePolicy::Warn)?;
        r.visit_method("Fan Speed", Thermostat::fan_speed, Thermostat::set_fan_speed);
        let handlers = r.into_handlers();

        assert_eq!(
            handlers.duplicate_types(),
            vec![ValueType::of::<u8>(), ValueType::of::<i32>()]
        );
        assert_eq!(thermostat.fan_speed, 4);
        Ok(())
    }

    #[cfg(feature = "logging")]
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    #[cfg(feature = "logging")]
    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[cfg(feature = "logging")]
    impl Captured {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[cfg(feature = "logging")]
    #[test]
    fn test_policy_warn_logs_every_duplicated_type_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut thermostat = Thermostat::new();
            let handlers = (
                handler(|_: &str, _: Property<u8>| {}),
                handler(|_: &str, _: Property<u8>| {}),
                handler(|_: &str, _: Property<i32>| {}),
                handler(|_: &str, _: Property<i32>| {}),
            );
            let result =
                Reflector::with_policy(&mut thermostat, handlers, DuplicatePolicy::Warn);
            assert!(result.is_ok());
        });

        let lines = captured.lines();
        let warnings: Vec<&String> = lines.iter().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{lines:?}");
        assert!(warnings[0].contains("ValueType(\"u8\")"), "{lines:?}");
        assert!(warnings[0].contains("ValueType(\"i32\")"), "{lines:?}");
        assert!(!lines.iter().any(|l| l.contains("shadows")), "{lines:?}");
    }

    #[test]
    fn test_policy_reject_accepts_distinct_types() -> Result<(), ReflectError> {
        let mut thermostat = Thermostat::new();
        let handlers = (
            handler(|_: &str, _: Property<f64>| {}),
            handler(|_: &str, _: Property<f32>| {}),
        );

        let r = Reflector::with_policy(&mut thermostat, handlers, DuplicatePolicy::Reject)?;
        assert_eq!(r.summary(), Summary::default());
        Ok(())
    }

    #[test]
    fn test_into_handlers_returns_set() {
        let mut thermostat = Thermostat::new();
        let r = Reflector::new(
            &mut thermostat,
            (
                handler(|_: &str, _: Property<u8>| {}),
                handler(|_: &str, _: Property<u8>| {}),
            ),
        );

        let handlers = r.into_handlers();
        assert_eq!(handlers.duplicate_types(), vec![ValueType::of::<u8>()]);
    }

    #[test]
    fn test_handler_set_reused_across_calls() {
        let mut first = Thermostat::new();
        let mut second = Thermostat::new();
        second.label = "attic".to_string();

        let labels = RefCell::new(Vec::new());
        let mut handlers = (handler(|_: &str, p: Property<String>| {
            labels.borrow_mut().push(p.get())
        }),);

        first.reflect(&mut handlers);
        second.reflect(&mut handlers);
        drop(handlers);

        assert_eq!(labels.into_inner(), vec!["hallway", "attic"]);
    }

    #[test]
    fn test_nested_reflection_from_handler() {
        let mut outer = Thermostat::new();
        let inner = RefCell::new(Thermostat::new());

        outer.reflect((handler(|_: &str, mut p: Property<u8>| {
            let mut nested = inner.borrow_mut();
            nested.reflect((handler(|_: &str, mut q: Property<u8>| q.set(5)),));
            p.set(nested.fan_speed - 1);
        }),));

        assert_eq!(inner.borrow().fan_speed, 5);
        assert_eq!(outer.fan_speed, 4);
    }

    #[test]
    fn test_functor_helper_in_handler() {
        let mut thermostat = Thermostat::new();
        let mirror = Cell::new(0.0f64);

        thermostat.reflect((handler(|_: &str, p: Property<f64>| {
            let mut copy = functor(|| mirror.get(), |v| mirror.set(v));
            crate::Accessor::set(&mut copy, p.get());
        }),));

        assert_eq!(mirror.get(), 20.5);
    }
}
