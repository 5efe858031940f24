//! Rhai scripting surface.
//!
//! Each family module exposes `register_functions`; this module wires the
//! enabled families into an engine and wraps compile/eval in
//! [`StringEngine`]. Scripts see the input as the variable `text`.

use anyhow::{Context, Result};
use rhai::{Array, Dynamic, Engine, Map, Scope, AST};

use crate::config::{Family, StringcraftConfig};
use crate::error::Error;
use crate::{analysis, case, clean, edit, encoding, extract, format, random, search, trim, validate};

/// First char of a script-side char argument
pub(crate) fn first_char(arg: &str) -> Option<char> {
    arg.chars().next()
}

/// String elements of a script array; other element types are skipped
pub(crate) fn strings_from_array(items: Array) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| item.into_string().ok())
        .collect()
}

pub(crate) fn to_array<T>(items: impl IntoIterator<Item = T>) -> Array
where
    T: Clone + Send + Sync + 'static,
{
    items.into_iter().map(Dynamic::from).collect()
}

pub(crate) fn option_to_dynamic(value: Option<String>) -> Dynamic {
    value.map(Dynamic::from).unwrap_or(Dynamic::UNIT)
}

pub(crate) fn json_to_dynamic(value: &serde_json::Value) -> Dynamic {
    match value {
        serde_json::Value::String(s) => Dynamic::from(s.clone()),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Dynamic::from(i)
            } else if let Some(f) = n.as_f64() {
                Dynamic::from(f)
            } else {
                Dynamic::from(n.to_string())
            }
        }
        serde_json::Value::Bool(b) => Dynamic::from(*b),
        serde_json::Value::Null => Dynamic::UNIT,
        serde_json::Value::Array(items) => {
            Dynamic::from_array(items.iter().map(json_to_dynamic).collect())
        }
        serde_json::Value::Object(fields) => {
            let mut map = Map::new();
            for (key, field) in fields {
                map.insert(key.as_str().into(), json_to_dynamic(field));
            }
            Dynamic::from_map(map)
        }
    }
}

/// Register every family enabled in `config` and apply its engine limits
pub fn register_all_functions(engine: &mut Engine, config: &StringcraftConfig) {
    engine.set_max_string_size(config.max_string_size);
    engine.set_max_array_size(config.max_array_size);

    for family in &config.families {
        match family {
            Family::Case => case::register_functions(engine),
            Family::Trim => trim::register_functions(engine),
            Family::Search => search::register_functions(engine),
            Family::Extract => extract::register_functions(engine),
            Family::Validate => validate::register_functions(engine),
            Family::Encoding => encoding::register_functions(engine),
            Family::Analysis => analysis::register_functions(engine),
            Family::Random => match config.random_seed {
                Some(seed) => random::register_seeded_functions(engine, seed),
                None => random::register_functions(engine),
            },
            Family::Edit => edit::register_functions(engine),
            Family::Clean => clean::register_functions(engine),
            Family::Format => format::register_functions(engine),
        }
    }
}

#[derive(Clone)]
pub struct CompiledExpression {
    ast: AST,
    expr: String,
}

impl CompiledExpression {
    pub fn expr(&self) -> &str {
        &self.expr
    }
}

/// A Rhai engine preloaded with the configured string functions
pub struct StringEngine {
    engine: Engine,
    config: StringcraftConfig,
}

impl StringEngine {
    pub fn new(config: StringcraftConfig) -> crate::Result<Self> {
        config.validate()?;

        let mut engine = Engine::new();
        engine.set_optimization_level(rhai::OptimizationLevel::Simple);
        register_all_functions(&mut engine, &config);

        Ok(Self { engine, config })
    }

    pub fn config(&self) -> &StringcraftConfig {
        &self.config
    }

    pub fn compile(&self, expr: &str) -> Result<CompiledExpression> {
        let ast = self
            .engine
            .compile(expr)
            .with_context(|| format!("Failed to compile expression: {}", expr))?;
        log::debug!("compiled expression: {}", expr);
        Ok(CompiledExpression {
            ast,
            expr: expr.to_string(),
        })
    }

    /// Evaluate with `text` bound to the input
    pub fn eval_with_text<T: Clone + Send + Sync + 'static>(
        &self,
        compiled: &CompiledExpression,
        text: &str,
    ) -> Result<T> {
        let mut scope = Scope::new();
        scope.push("text", text.to_string());
        self.engine
            .eval_ast_with_scope::<T>(&mut scope, &compiled.ast)
            .map_err(|e| Error::Script(e.to_string()))
            .with_context(|| format!("Failed to evaluate expression '{}'", compiled.expr))
    }

    /// Compile and evaluate in one step, expecting a string result
    pub fn apply(&self, expr: &str, text: &str) -> Result<String> {
        let compiled = self.compile(expr)?;
        self.eval_with_text::<String>(&compiled, text)
    }
}
