pub mod context;
pub mod error;
pub mod name_gen;
pub mod options;
pub mod private_names;
pub mod scope;
pub mod transforms;
pub mod utils;
pub mod walker;

use wasm_bindgen::prelude::*;

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::context::TransformContext;
use crate::error::TransformError;
use crate::options::{FactoryPath, TransformOptions};
use crate::private_names::GeneratedIdentifier;
use crate::scope::ScopeTree;
use crate::transforms::declarations::emit_declarations;
use crate::transforms::PrivateNameRewriter;
use crate::walker::Walker;

#[wasm_bindgen(getter_with_clone)]
pub struct TransformResult {
    pub transformed_code: String,
    /// Generated bindings, comma separated, in declaration order.
    pub private_names: String,
    pub had_error: bool,
    pub error_message: Option<String>,
}

impl TransformResult {
    fn from_outcome(outcome: Result<TransformOutput, TransformError>) -> Self {
        match outcome {
            Ok(output) => Self {
                private_names: output
                    .private_names
                    .iter()
                    .map(|generated| generated.binding.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
                transformed_code: output.code,
                had_error: false,
                error_message: None,
            },
            Err(err) => Self {
                transformed_code: String::new(),
                private_names: String::new(),
                had_error: true,
                error_message: Some(err.to_string()),
            },
        }
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

pub fn console_log(s: String) {
    #[cfg(not(target_arch = "wasm32"))]
    println!("{}", s);

    #[cfg(target_arch = "wasm32")]
    log(&format!("[Rust] {}", s));
}

// Simple wrapper for `log(format!())` into `log!()`
// This will println!() in CLI and console.log(format!()) in nodejs etc
#[macro_export]
macro_rules! log {
    ($fmt_str:literal) => {
        $crate::console_log(format!($fmt_str))
    };

    ($fmt_str:literal, $($args:expr),*) => {
        $crate::console_log(format!($fmt_str, $($args),*))
    };
}

/// Printed result of transforming one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    pub private_names: Vec<GeneratedIdentifier>,
}

/// What [`transform_program`] did to the tree it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    /// Every generated binding, in the order it is declared.
    pub private_names: Vec<GeneratedIdentifier>,
    /// Number of sites that were rewritten.
    pub rewritten: usize,
}

#[wasm_bindgen]
pub fn transform_code(source: &str) -> TransformResult {
    TransformResult::from_outcome(transform(source, &TransformOptions::default()))
}

#[wasm_bindgen]
pub fn transform_code_with_options(source: &str, options: JsValue) -> Result<TransformResult, JsValue> {
    let options: TransformOptions = if options.is_undefined() || options.is_null() {
        TransformOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };

    Ok(TransformResult::from_outcome(transform(source, &options)))
}

/// Parse `source`, rewrite its private names and print it back.
pub fn transform(source: &str, options: &TransformOptions) -> Result<TransformOutput, TransformError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(options.module);
    let parsed = Parser::new(&allocator, source, source_type).parse();

    if !parsed.errors.is_empty() {
        return Err(TransformError::Parse(parsed.errors.iter().map(|err| err.to_string()).collect()));
    }

    let mut program = parsed.program;
    let report = transform_program(&mut program, &allocator, options)?;

    let codegen: Codegen<false> = Codegen::new(source.len(), CodegenOptions::default());
    let code = codegen.build(&program);

    Ok(TransformOutput { code, private_names: report.private_names })
}

/// Rewrite an already parsed unit in place.
///
/// On error the tree may be partially rewritten and should be discarded.
pub fn transform_program<'a>(
    program: &mut Program<'a>,
    allocator: &'a Allocator,
    options: &TransformOptions,
) -> Result<TransformReport, TransformError> {
    let factory = FactoryPath::parse(&options.factory)?;

    if options.verbose {
        utils::rule("Underscore-prefixed property names become computed keys bound to private tokens");
        utils::example("this._foo = 1", "var _foo = Symbol.private('foo'); this[_foo] = 1");
    }

    let scopes = ScopeTree::collect(program)?;
    let mut ctx = TransformContext::new(options, scopes);

    let mut walker = Walker::new(PrivateNameRewriter::new(allocator, &mut ctx));
    walker.walk(program)?;
    let rewritten = walker.visitor().rewritten();
    drop(walker);

    let declared = emit_declarations(program, &ctx.names, &factory, allocator);
    if options.verbose {
        log!("Rewrote {} sites, declared {} private names", rewritten, declared);
    }

    Ok(TransformReport { private_names: ctx.names.iter().cloned().collect(), rewritten })
}
