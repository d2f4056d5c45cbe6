#![no_main]
use jsonvet::{Code, Diagnostic, LineIndex, NullValidator, ValidatingListener, parse, validate_manifest};
use libfuzzer_sys::fuzz_target;

fn check(source: &str) {
    // Parsing alone must be total, and a failed parse surfaces exactly one
    // syntax diagnostic through the listener.
    let mut sink: Vec<Diagnostic> = Vec::new();
    let mut listener = ValidatingListener::new(Box::new(NullValidator), &mut sink);
    let result = parse(source, &mut listener);
    let depth = listener.depth();
    let syntax_count = sink
        .iter()
        .filter(|d| d.code == Code::SyntaxError)
        .count();
    match result {
        Ok(()) => {
            assert_eq!(syntax_count, 0);
            assert_eq!(depth, 0);
        }
        Err(error) => {
            assert_eq!(syntax_count, 1);
            assert!(error.span.end <= source.len());
        }
    }

    // Full manifest validation is total as well, and every reported span
    // must map back into the source.
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    validate_manifest(source, &mut diagnostics);
    let index = LineIndex::new(source);
    for diagnostic in &diagnostics {
        assert!(diagnostic.span.start <= diagnostic.span.end);
        assert!(diagnostic.span.end <= source.len());
        let _ = index.line_column(diagnostic.span.start);
    }
}

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);
    check(&source);
});
