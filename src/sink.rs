// SPDX-License-Identifier: Apache-2.0

//! One-way observer for newly indexed tokens (§9 "ingest callback reporting
//! new words"). Used by an external spelling-correction dictionary builder;
//! stateless with respect to the index itself.

/// Implementors learn about one token per call, in ingest order, the first
/// time it's seen for a given (document, field). The index never reads
/// anything back from this trait.
pub trait NewWordSink {
    fn observe(&self, token: &str);
}

impl<F: Fn(&str)> NewWordSink for F {
    fn observe(&self, token: &str) {
        self(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closure_sink_collects_observed_tokens() {
        let seen = RefCell::new(Vec::new());
        let sink = |token: &str| seen.borrow_mut().push(token.to_string());

        sink.observe("mongodb");
        sink.observe("atlas");

        assert_eq!(*seen.borrow(), vec!["mongodb".to_string(), "atlas".to_string()]);
    }
}
