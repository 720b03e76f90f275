#![allow(missing_docs)]
#![allow(dead_code)]

use jsonwire::{VisitResult, Visitor};

/// One recorded visitor event, with owned payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PushLabel(Vec<u8>),
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    AddEmptyObject,
    AddEmptyArray,
    AddBool(bool),
    AddNumber(Vec<u8>),
    AddString(Vec<u8>),
    AddNull,
    AddUndefined,
}

/// Captures the event stream so tests can assert on it directly.
#[derive(Debug, Default)]
pub struct RecordingVisitor {
    pub events: Vec<Event>,
}

impl Visitor for RecordingVisitor {
    fn push_label(&mut self, label: &[u8]) -> VisitResult {
        self.events.push(Event::PushLabel(label.to_vec()));
        Ok(())
    }
    fn start_object(&mut self) -> VisitResult {
        self.events.push(Event::StartObject);
        Ok(())
    }
    fn end_object(&mut self) -> VisitResult {
        self.events.push(Event::EndObject);
        Ok(())
    }
    fn start_array(&mut self) -> VisitResult {
        self.events.push(Event::StartArray);
        Ok(())
    }
    fn end_array(&mut self) -> VisitResult {
        self.events.push(Event::EndArray);
        Ok(())
    }
    fn add_empty_object(&mut self) -> VisitResult {
        self.events.push(Event::AddEmptyObject);
        Ok(())
    }
    fn add_empty_array(&mut self) -> VisitResult {
        self.events.push(Event::AddEmptyArray);
        Ok(())
    }
    fn add_bool(&mut self, value: bool) -> VisitResult {
        self.events.push(Event::AddBool(value));
        Ok(())
    }
    fn add_number(&mut self, lexeme: &[u8]) -> VisitResult {
        self.events.push(Event::AddNumber(lexeme.to_vec()));
        Ok(())
    }
    fn add_string(&mut self, value: &[u8]) -> VisitResult {
        self.events.push(Event::AddString(value.to_vec()));
        Ok(())
    }
    fn add_null(&mut self) -> VisitResult {
        self.events.push(Event::AddNull);
        Ok(())
    }
    fn add_undefined(&mut self) -> VisitResult {
        self.events.push(Event::AddUndefined);
        Ok(())
    }
}

/// JSON text to binary, panicking on parse failure.
pub fn to_binary(source: &[u8]) -> Vec<u8> {
    let mut dest = jsonwire::Buffer::new();
    assert!(
        jsonwire::transcode_json_to_binary(source, &mut dest),
        "parse failed: {}",
        String::from_utf8_lossy(dest.as_slice())
    );
    dest.as_slice().to_vec()
}

/// Binary back to JSON text with the given options.
pub fn to_json(binary: &[u8], options: &jsonwire::TextOptions) -> String {
    let mut dest = jsonwire::Buffer::new();
    assert!(
        jsonwire::transcode_binary_to_json(binary, &mut dest, options),
        "binary decode failed: {}",
        String::from_utf8_lossy(dest.as_slice())
    );
    String::from_utf8(dest.as_slice().to_vec()).expect("writer emitted invalid UTF-8")
}
