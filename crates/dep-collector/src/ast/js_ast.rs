use anyhow::{anyhow, Result};
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config as JsCodegenConfig, Emitter};
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{Parser, StringInput, Syntax};

use crate::ast::error;

/// A parsed module plus the source map it was parsed against. The collection
/// passes only need the `Module`; this type is the convenience surface for
/// callers and tests that start from source text.
pub struct JsAst {
    pub ast: Module,
    pub cm: Lrc<SourceMap>,
}

impl std::fmt::Debug for JsAst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `SourceMap` has no `Debug` impl, so only the AST is shown.
        f.debug_struct("JsAst").field("ast", &self.ast).finish_non_exhaustive()
    }
}

impl JsAst {
    pub fn parse(content: &str, path: &str) -> Result<Self> {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(
            FileName::Custom(path.to_string()).into(),
            content.to_string(),
        );
        let lexer = Lexer::new(
            Syntax::Es(Default::default()),
            EsVersion::Es2015,
            StringInput::from(&*fm),
            None,
        );
        let mut parser = Parser::new_from(lexer);
        let ast = parser.parse_module();

        let mut ast_errors = parser.take_errors();
        match ast {
            Ok(ast) if ast_errors.is_empty() => Ok(JsAst { ast, cm }),
            result => {
                if let Err(err) = result {
                    ast_errors.push(err);
                }
                let messages = ast_errors
                    .iter()
                    .map(|err| err.kind().msg().to_string())
                    .collect::<Vec<String>>()
                    .join("\n");
                Err(anyhow!(error::ParseError::JsParseError { messages }))
            }
        }
    }

    pub fn generate(&self) -> Result<String> {
        let mut buf = vec![];
        {
            let mut emitter = Emitter {
                cfg: JsCodegenConfig::default(),
                cm: self.cm.clone(),
                comments: None,
                wr: Box::new(JsWriter::new(self.cm.clone(), "\n", &mut buf, None)),
            };
            emitter.emit_module(&self.ast).map_err(|err| {
                anyhow!(error::GenerateError::JsGenerateError {
                    message: err.to_string()
                })
            })?;
        }
        Ok(String::from_utf8(buf)?)
    }
}
