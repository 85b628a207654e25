//! Shared stubs for unit tests: call-counting expressions, a lookup-table
//! expression parser, and a recording diagnostic sink.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::context::{ContextId, EvalContext};
use crate::diagnostics::DiagnosticSink;
use crate::expr::{ExprError, Expression, ExpressionParser};
use crate::value::Value;

pub(crate) struct TestEvent {
    id: ContextId,
}

impl TestEvent {
    pub fn new() -> Self {
        Self {
            id: ContextId::new(),
        }
    }
}

impl EvalContext for TestEvent {
    fn context_id(&self) -> ContextId {
        self.id
    }
}

/// Expression stub with a mutable resolved value and an evaluation counter,
/// so tests can observe whether the cache skipped re-evaluation.
pub(crate) struct StubExpression {
    single: Mutex<Value>,
    array: Vec<Value>,
    multi: bool,
    join: String,
    debug: String,
    calls: AtomicUsize,
}

impl StubExpression {
    pub fn single(value: &str) -> Arc<Self> {
        Self::single_with_debug(value, "stub")
    }

    pub fn single_with_debug(value: &str, debug: &str) -> Arc<Self> {
        Arc::new(Self {
            single: Mutex::new(Value::from(value)),
            array: Vec::new(),
            multi: false,
            join: "and".to_string(),
            debug: debug.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn multi(values: &[&str], join: &str) -> Arc<Self> {
        Arc::new(Self {
            single: Mutex::new(Value::Null),
            array: values.iter().map(|v| Value::from(*v)).collect(),
            multi: true,
            join: join.to_string(),
            debug: "stub".to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn set_single(&self, value: &str) {
        *self.single.lock().unwrap() = Value::from(value);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Expression for StubExpression {
    fn is_single(&self) -> bool {
        !self.multi
    }

    fn get_single(&self, _ctx: &dyn EvalContext) -> Value {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.single.lock().unwrap().clone()
    }

    fn get_array(&self, _ctx: &dyn EvalContext) -> Vec<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.array.clone()
    }

    fn join_word(&self) -> &str {
        &self.join
    }

    fn debug_text(&self) -> String {
        self.debug.clone()
    }
}

/// Expression parser backed by a name table; unknown names parse to `None`.
pub(crate) struct StubParser {
    exprs: HashMap<String, Arc<StubExpression>>,
}

impl StubParser {
    pub fn empty() -> Self {
        Self {
            exprs: HashMap::new(),
        }
    }

    pub fn with(name: &str, expr: Arc<StubExpression>) -> Self {
        Self::empty().and(name, expr)
    }

    pub fn and(mut self, name: &str, expr: Arc<StubExpression>) -> Self {
        self.exprs.insert(name.to_string(), expr);
        self
    }
}

impl ExpressionParser for StubParser {
    fn parse(&self, text: &str) -> Result<Option<Arc<dyn Expression>>, ExprError> {
        Ok(self
            .exprs
            .get(text)
            .map(|expr| expr.clone() as Arc<dyn Expression>))
    }
}

/// Expression parser that fails every parse with a fixed message.
pub(crate) struct FailingParser {
    message: String,
}

impl FailingParser {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl ExpressionParser for FailingParser {
    fn parse(&self, _text: &str) -> Result<Option<Arc<dyn Expression>>, ExprError> {
        Err(ExprError::new(self.message.clone()))
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
