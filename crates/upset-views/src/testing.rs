//! Fixtures shared by the view-model tests

use std::sync::Arc;
use parking_lot::Mutex;
use serde_json::json;
use upset_core::{Event, EventBus};
use upset_data::engine::render_rows;
use upset_data::{AggregateBy, Attribute, AttributeType, Data, DataSetInfo, RenderConfig, Set};

use crate::view_model::View;

/// A = {0, 1, 2}, B = {1, 2, 3}, C = {3}; element 4 is in no set
///
/// Rows are computed without aggregation and without empty subsets, so the
/// first row is the subset A ∩ B.
pub fn sample_data() -> Data {
    let mut data = Data::new(
        "sample",
        vec![
            Set::new(0, "A", vec![0, 1, 2]),
            Set::new(1, "B", vec![1, 2, 3]),
            Set::new(2, "C", vec![3]),
        ],
        vec![
            Attribute::new(
                "Name",
                AttributeType::Id,
                vec![json!("ann"), json!("bo"), json!("cy"), json!("di"), json!("ed")],
            ),
            Attribute::new("Age", AttributeType::Integer, vec![json!(31), json!(42), json!(27), json!(55), json!(19)]),
            Attribute::new("Sets", AttributeType::Sets, vec![json!([]); 5]),
        ],
        5,
    );
    let config = RenderConfig {
        first_aggregate_by: AggregateBy::None,
        hide_empties: true,
        ..RenderConfig::default()
    };
    data.render_rows = render_rows(&data, &config, None);
    data
}

pub fn sample_info() -> DataSetInfo {
    DataSetInfo {
        name: "sample".into(),
        file: "sample.csv".into(),
        set_count: 3,
        attribute_count: 2,
        author: "tests".into(),
        description: String::new(),
        source: String::new(),
    }
}

/// View recording every local event of one kind
pub struct RecordingView<E: Event> {
    kind: E::Kind,
    events: Arc<Mutex<Vec<E>>>,
}

impl<E: Event + Clone> RecordingView<E> {
    pub fn new(kind: E::Kind) -> Self {
        Self {
            kind,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    pub fn last(&self) -> Option<E> {
        self.events.lock().last().cloned()
    }
}

impl<E: Event + Clone> View<E> for RecordingView<E> {
    fn create(&self, comm: &EventBus<E>) {
        let events = self.events.clone();
        comm.on(self.kind, move |event| {
            events.lock().push(event.clone());
            Ok(())
        });
    }
}
