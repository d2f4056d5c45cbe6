//! Adapter between raw parser callbacks and the validator visitor tree.
//!
//! The parser drives events, not the validator, so the natural
//! recursive-descent call stack is replaced by explicit stacks managed
//! here: one frame per open container (holding the saved pending key) and
//! one saved validator per scope. Push and pop are strictly paired per
//! container enter/leave and per property name/value pair, so after every
//! balanced document the stacks return to their initial depth.

use alloc::{boxed::Box, vec::Vec};

use crate::{
    diagnostic::{Code, Diagnostic, ErrorSink},
    entity::{ArrayEntity, Entity, NumberValue, ObjectEntity, StringEntity},
    error::ParseError,
    parser::Listener,
    span::Span,
    validator::Validator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Array,
    Object,
}

/// One open container: the key it hangs under (for object members), and
/// for arrays the number of elements seen so far.
struct Frame {
    kind: FrameKind,
    len: usize,
    saved_key: Option<StringEntity>,
}

/// A [`Listener`] that feeds a tree of [`Validator`]s.
///
/// Constructed with the root validator and a diagnostics sink; after a
/// successful parse the root validator has seen the whole document.
///
/// ```rust
/// use jsonvet::{Diagnostic, NullValidator, ValidatingListener, parse};
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let mut listener = ValidatingListener::new(Box::new(NullValidator), &mut diagnostics);
/// parse(r#"{"anything": ["goes"]}"#, &mut listener).unwrap();
/// assert!(diagnostics.is_empty());
/// ```
pub struct ValidatingListener<'s> {
    sink: &'s mut dyn ErrorSink,
    current: Box<dyn Validator>,
    validators: Vec<Box<dyn Validator>>,
    containers: Vec<Frame>,
    pending_key: Option<StringEntity>,
    pending_value: Option<Entity>,
}

impl<'s> ValidatingListener<'s> {
    pub fn new(root: Box<dyn Validator>, sink: &'s mut dyn ErrorSink) -> Self {
        Self {
            sink,
            current: root,
            validators: Vec::with_capacity(8),
            containers: Vec::with_capacity(8),
            pending_key: None,
            pending_value: None,
        }
    }

    /// Stack depth for the balanced-nesting invariant; 0 between documents.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.validators.len()
    }

    fn take_value(&mut self) -> Option<Entity> {
        let value = self.pending_value.take();
        debug_assert!(value.is_some(), "no pending value for completed scope");
        value
    }
}

impl Listener for ValidatingListener<'_> {
    fn handle_string(&mut self, span: Span, value: alloc::string::String) {
        self.pending_value = Some(Entity::String(StringEntity { span, text: value }));
    }

    fn handle_number(&mut self, span: Span, value: NumberValue) {
        self.pending_value = Some(Entity::Number { span, value });
    }

    fn handle_bool(&mut self, span: Span, value: bool) {
        self.pending_value = Some(Entity::Bool { span, value });
    }

    fn handle_null(&mut self, span: Span) {
        self.pending_value = Some(Entity::Null { span });
    }

    fn begin_object(&mut self, _start: usize) {
        self.containers.push(Frame {
            kind: FrameKind::Object,
            len: 0,
            saved_key: self.pending_key.take(),
        });
        let child = self.current.enter_object(self.sink);
        self.validators
            .push(core::mem::replace(&mut self.current, child));
    }

    fn end_object(&mut self, span: Span) {
        let object = ObjectEntity { span };
        self.current.leave_object(&object, self.sink);
        // `pop` cannot fail: the parser only closes containers it opened.
        if let Some(parent) = self.validators.pop() {
            self.current = parent;
        }
        if let Some(frame) = self.containers.pop() {
            debug_assert_eq!(frame.kind, FrameKind::Object, "container stack out of sync");
            self.pending_key = frame.saved_key;
        }
        self.pending_value = Some(Entity::Object(object));
    }

    fn begin_array(&mut self, _start: usize) {
        self.containers.push(Frame {
            kind: FrameKind::Array,
            len: 0,
            saved_key: self.pending_key.take(),
        });
        let child = self.current.enter_array(self.sink);
        self.validators
            .push(core::mem::replace(&mut self.current, child));
    }

    fn end_array(&mut self, span: Span) {
        let len = self.containers.last().map_or(0, |frame| frame.len);
        let array = ArrayEntity { span, len };
        self.current.leave_array(&array, self.sink);
        if let Some(parent) = self.validators.pop() {
            self.current = parent;
        }
        if let Some(frame) = self.containers.pop() {
            debug_assert_eq!(frame.kind, FrameKind::Array, "container stack out of sync");
            self.pending_key = frame.saved_key;
        }
        self.pending_value = Some(Entity::Array(array));
    }

    fn property_name(&mut self) {
        let Some(Entity::String(key)) = self.pending_value.take() else {
            debug_assert!(false, "property name without a pending string");
            return;
        };
        let child = self.current.property_name(&key, self.sink);
        self.validators
            .push(core::mem::replace(&mut self.current, child));
        self.pending_key = Some(key);
    }

    fn property_value(&mut self) {
        if let Some(value) = self.take_value() {
            self.current.property_value(&value, self.sink);
        }
        // Restore the validator that was active before the property name.
        if let Some(parent) = self.validators.pop() {
            self.current = parent;
        }
        self.pending_key = None;
    }

    fn array_element(&mut self) {
        if let Some(value) = self.take_value() {
            self.current.array_element(&value, self.sink);
        }
        if let Some(frame) = self.containers.last_mut() {
            frame.len += 1;
        }
    }

    fn end_document(&mut self) {
        debug_assert_eq!(self.validators.len(), 0, "validator stack not balanced");
        if let Some(value) = self.pending_value.take() {
            self.current.root_value(&value, self.sink);
        }
    }

    fn fail(&mut self, span: Span, error: &ParseError) {
        self.sink.report(Diagnostic::error(
            span,
            Code::SyntaxError,
            alloc::format!("{}", error.kind),
        ));
    }
}
