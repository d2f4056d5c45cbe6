use alloc::{string::String, vec::Vec};

use crate::{
    entity::NumberValue,
    error::ParseError,
    parser::{Listener, parse},
    span::Span,
};

/// Everything the parser tells a listener, recorded for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    String(Span, String),
    Number(Span, NumberValue),
    Bool(Span, bool),
    Null(Span),
    BeginObject(usize),
    PropertyName,
    PropertyValue,
    EndObject(Span),
    BeginArray(usize),
    ArrayElement,
    EndArray(Span),
    EndDocument,
    Fail(Span),
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Listener for Recorder {
    fn handle_string(&mut self, span: Span, value: String) {
        self.events.push(Event::String(span, value));
    }

    fn handle_number(&mut self, span: Span, value: NumberValue) {
        self.events.push(Event::Number(span, value));
    }

    fn handle_bool(&mut self, span: Span, value: bool) {
        self.events.push(Event::Bool(span, value));
    }

    fn handle_null(&mut self, span: Span) {
        self.events.push(Event::Null(span));
    }

    fn begin_object(&mut self, start: usize) {
        self.events.push(Event::BeginObject(start));
    }

    fn property_name(&mut self) {
        self.events.push(Event::PropertyName);
    }

    fn property_value(&mut self) {
        self.events.push(Event::PropertyValue);
    }

    fn end_object(&mut self, span: Span) {
        self.events.push(Event::EndObject(span));
    }

    fn begin_array(&mut self, start: usize) {
        self.events.push(Event::BeginArray(start));
    }

    fn array_element(&mut self) {
        self.events.push(Event::ArrayElement);
    }

    fn end_array(&mut self, span: Span) {
        self.events.push(Event::EndArray(span));
    }

    fn end_document(&mut self) {
        self.events.push(Event::EndDocument);
    }

    fn fail(&mut self, span: Span, _error: &ParseError) {
        self.events.push(Event::Fail(span));
    }
}

/// Parses `source` into a recorded event list.
pub fn record(source: &str) -> (Result<(), ParseError>, Vec<Event>) {
    let mut recorder = Recorder::default();
    let result = parse(source, &mut recorder);
    (result, recorder.events)
}

/// Shorthand for tests asserting on spans.
pub fn span(start: usize, end: usize) -> Span {
    Span::new(start, end)
}
