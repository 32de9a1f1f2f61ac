//! Benchmark Registry
//!
//! Entries are added through a `Registrar` during an explicit build phase
//! and visited afterwards in exactly the order they were registered.

use crate::entry::{Benchmark, OperationTest};
use crate::ops::{
    AcosOp, AcoshOp, AddOp, AsinOp, AsinhOp, AtanOp, AtanhOp, CosOp, CoshOp, DivOp, ErfOp, ExpOp,
    LogOp, MulOp, Operation, Primitive, SetOp, SinOp, SinhOp, SqrtOp, SubOp, TanOp, TanhOp,
};
use tracing::warn;

/// Name prefix of the standard suite
pub const STANDARD_PREFIX: &str = "fbig";

/// An entry whose name announces a different primitive than its adapter binds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Registered name
    pub name: String,
    /// Primitive named by the last `_` segment of the name
    pub declared: Primitive,
    /// Primitive the adapter actually binds
    pub bound: Primitive,
}

/// Primitive announced by the last `_`-separated segment of `name`
pub fn declared_primitive(name: &str) -> Option<Primitive> {
    name.rsplit('_').next()?.parse().ok()
}

/// Append-only builder handed out by `Registry::build`
#[derive(Default)]
pub struct Registrar {
    entries: Vec<Box<dyn Benchmark>>,
    mismatches: Vec<Mismatch>,
    duplicates: Vec<String>,
}

impl Registrar {
    /// Register an `OperationTest` binding `operation` under `name`
    pub fn register<O: Operation + 'static>(&mut self, name: impl Into<String>, operation: O) -> &mut Self {
        self.register_entry(Box::new(OperationTest::new(name, operation)))
    }

    /// Register a custom entry. A name already taken is refused and recorded.
    pub fn register_entry(&mut self, entry: Box<dyn Benchmark>) -> &mut Self {
        if self.entries.iter().any(|e| e.name() == entry.name()) {
            warn!(
                name = entry.name(),
                "benchmark name already registered; dropping the later entry"
            );
            self.duplicates.push(entry.name().to_string());
            return self;
        }
        if let (Some(declared), Some(bound)) = (declared_primitive(entry.name()), entry.primitive()) {
            if declared != bound {
                warn!(
                    name = entry.name(),
                    declared = %declared,
                    bound = %bound,
                    "benchmark name does not match its adapter; keeping the registered binding"
                );
                self.mismatches.push(Mismatch {
                    name: entry.name().to_string(),
                    declared,
                    bound,
                });
            }
        }
        self.entries.push(entry);
        self
    }
}

/// Ordered, sealed collection of benchmark entries
#[derive(Default)]
pub struct Registry {
    entries: Vec<Box<dyn Benchmark>>,
    mismatches: Vec<Mismatch>,
    duplicates: Vec<String>,
}

impl Registry {
    /// Run the registration phase and seal the result
    pub fn build(register: impl FnOnce(&mut Registrar)) -> Self {
        let mut registrar = Registrar::default();
        register(&mut registrar);
        Self {
            entries: registrar.entries,
            mismatches: registrar.mismatches,
            duplicates: registrar.duplicates,
        }
    }

    /// Registry holding the standard suite
    pub fn standard() -> Self {
        Self::build(|r| register_standard(r, STANDARD_PREFIX))
    }

    /// Visit every entry in registration order
    pub fn for_each(&mut self, mut visitor: impl FnMut(&mut dyn Benchmark)) {
        for entry in &mut self.entries {
            visitor(entry.as_mut());
        }
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Benchmark> {
        self.entries.iter().map(|e| e.as_ref())
    }

    /// Mutable entries in registration order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Benchmark + 'static)> {
        self.entries.iter_mut().map(|e| e.as_mut())
    }

    /// Entry names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name()).collect()
    }

    /// Entry by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Benchmark + 'static)> {
        self.entries
            .iter_mut()
            .find(|e| e.name() == name)
            .map(|e| e.as_mut())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name/adapter mismatches seen during registration
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// Names refused at registration because an earlier entry holds them
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

/// Register the 21 standard entries as `<prefix>_<primitive>`
pub fn register_standard(registrar: &mut Registrar, prefix: &str) {
    let name = |p: Primitive| format!("{prefix}_{p}");
    registrar
        .register(name(Primitive::Add), AddOp)
        .register(name(Primitive::Sub), SubOp)
        .register(name(Primitive::Mul), MulOp)
        .register(name(Primitive::Div), DivOp)
        .register(name(Primitive::Set), SetOp)
        .register(name(Primitive::Sqrt), SqrtOp)
        .register(name(Primitive::Exp), ExpOp)
        .register(name(Primitive::Log), LogOp)
        .register(name(Primitive::Erf), ErfOp)
        .register(name(Primitive::Cos), CosOp)
        .register(name(Primitive::Sin), SinOp)
        .register(name(Primitive::Tan), TanOp)
        .register(name(Primitive::Acos), AcosOp)
        .register(name(Primitive::Asin), AsinOp)
        .register(name(Primitive::Atan), AtanOp)
        .register(name(Primitive::Cosh), CoshOp)
        .register(name(Primitive::Sinh), SinhOp)
        .register(name(Primitive::Tanh), TanhOp)
        .register(name(Primitive::Acosh), AcoshOp)
        .register(name(Primitive::Asinh), AsinhOp)
        .register(name(Primitive::Atanh), AtanhOp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;
    use mbench_stats::TimingSummary;

    #[test]
    fn test_standard_suite_order() {
        let registry = Registry::standard();
        let expected: Vec<String> = Primitive::ALL
            .iter()
            .map(|p| format!("fbig_{}", p.name()))
            .collect();
        assert_eq!(registry.names(), expected);
        assert!(registry.mismatches().is_empty());

        let bound: Vec<_> = registry.iter().filter_map(|e| e.primitive()).collect();
        assert_eq!(bound, Primitive::ALL);
    }

    #[test]
    fn test_order_is_registration_not_alphabetical() {
        let mut registry = Registry::build(|r| {
            r.register("z_sqrt", SqrtOp)
                .register("a_add", AddOp)
                .register("m_exp", ExpOp);
        });
        assert_eq!(registry.names(), ["z_sqrt", "a_add", "m_exp"]);

        let mut visited = Vec::new();
        registry.for_each(|e| visited.push(e.name().to_string()));
        assert_eq!(visited, ["z_sqrt", "a_add", "m_exp"]);
    }

    #[test]
    fn test_mismatch_is_flagged_and_kept() {
        let registry = Registry::build(|r| {
            r.register("mpfr_log", LogOp).register("mpfr_erf", LogOp);
        });
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.mismatches(),
            [Mismatch {
                name: "mpfr_erf".to_string(),
                declared: Primitive::Erf,
                bound: Primitive::Log,
            }]
        );
        let erf = registry.iter().nth(1).unwrap();
        assert_eq!(erf.primitive(), Some(Primitive::Log));
    }

    #[test]
    fn test_duplicate_name_is_refused() {
        let registry = Registry::build(|r| {
            r.register("dup", AddOp)
                .register("dup", SubOp)
                .register("other", SubOp);
        });
        assert_eq!(registry.names(), ["dup", "other"]);
        assert_eq!(registry.duplicates(), ["dup"]);
        assert_eq!(registry.iter().next().unwrap().primitive(), Some(Primitive::Add));
    }

    #[test]
    fn test_unrecognized_suffix_is_not_a_mismatch() {
        let registry = Registry::build(|r| {
            r.register("custom", AddOp);
        });
        assert!(registry.mismatches().is_empty());
        assert_eq!(declared_primitive("fbig_acosh"), Some(Primitive::Acosh));
        assert_eq!(declared_primitive("custom"), None);
    }

    #[test]
    fn test_get_mut_runs_single_entry() {
        let mut registry = Registry::standard();
        let inputs: Vec<String> = ["1", "2"].iter().map(|s| s.to_string()).collect();
        let mut sink: Vec<(String, TimingSummary)> = Vec::new();

        let entry = registry.get_mut("fbig_mul").unwrap();
        entry.run(&inputs, &Options::default(), &mut sink).unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].0, "fbig_mul");
        assert!(registry.get_mut("fbig_nope").is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::build(|_| {});
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
