//! Border-box observation for embedded content.
//
//! The observer diffs watched nodes' boxes once per tick and queues one
//! report per actual change, preserving the order in which changes were
//! seen. Reports carry their target so consumers can discard entries for
//! nodes they do not care about; the observer itself may be watching more
//! targets than any one consumer expects.

use std::collections::VecDeque;

use ratatui::layout::Rect;

use crate::surface::{EmbNodeId, EmbeddedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    pub target: EmbNodeId,
    pub rect: Rect,
}

#[derive(Debug, Default)]
pub struct SizeObserver {
    watched: Vec<(EmbNodeId, Option<Rect>)>,
    queue: VecDeque<SizeReport>,
}

impl SizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin observing `target`. The first flush after this call always
    /// produces a report, since no box has been reported yet.
    pub fn observe(&mut self, target: EmbNodeId) {
        if self.watched.iter().any(|(t, _)| *t == target) {
            return;
        }
        self.watched.push((target, None));
    }

    pub fn is_observing(&self, target: EmbNodeId) -> bool {
        self.watched.iter().any(|(t, _)| *t == target)
    }

    /// Compare every watched box against the last reported one and queue a
    /// report per change.
    pub fn flush(&mut self, doc: &EmbeddedDocument, viewport: Rect) {
        for (target, last) in &mut self.watched {
            let rect = doc.border_box(*target, viewport);
            if *last != Some(rect) {
                *last = Some(rect);
                self.queue.push_back(SizeReport {
                    target: *target,
                    rect,
                });
            }
        }
    }

    pub fn take_reports(&mut self) -> Vec<SizeReport> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_holder() -> (EmbeddedDocument, EmbNodeId) {
        let mut doc = EmbeddedDocument::new();
        let body = doc.ensure_body();
        let holder = doc.create_div();
        doc.append(body, holder);
        (doc, holder)
    }

    fn viewport() -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 10,
        }
    }

    #[test]
    fn first_flush_reports_unconditionally() {
        let (doc, holder) = doc_with_holder();
        let mut observer = SizeObserver::new();
        observer.observe(holder);
        observer.flush(&doc, viewport());
        let reports = observer.take_reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].target, holder);
    }

    #[test]
    fn unchanged_boxes_do_not_report_again() {
        let (doc, holder) = doc_with_holder();
        let mut observer = SizeObserver::new();
        observer.observe(holder);
        observer.flush(&doc, viewport());
        observer.take_reports();
        observer.flush(&doc, viewport());
        assert!(observer.take_reports().is_empty());
    }

    #[test]
    fn changes_report_in_order() {
        let (mut doc, holder) = doc_with_holder();
        let mut observer = SizeObserver::new();
        observer.observe(holder);
        observer.flush(&doc, viewport());
        observer.take_reports();

        let text = doc.create_text("grow");
        doc.append(holder, text);
        observer.flush(&doc, viewport());
        let more = doc.create_text("!!");
        doc.append(holder, more);
        observer.flush(&doc, viewport());

        let reports = observer.take_reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].rect.width, 4);
        assert_eq!(reports[1].rect.width, 6);
    }

    #[test]
    fn double_observe_is_a_no_op() {
        let (doc, holder) = doc_with_holder();
        let mut observer = SizeObserver::new();
        observer.observe(holder);
        observer.observe(holder);
        observer.flush(&doc, viewport());
        assert_eq!(observer.take_reports().len(), 1);
    }
}
