//! Graph store <-> document conversion.

use crate::document::schema::{
    CategoryFilter, DocumentConnection, DocumentNode, MindMapDocument, PreviewDocument,
    PreviewNode,
};
use crate::document::DocumentResult;
use crate::model::node::NodeId;
use crate::store::graph_store::{GraphStore, NewNode, Placement};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;

/// Counts from applying a document to a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub nodes_created: usize,
    pub connections_created: usize,
    /// Out-of-range, self-referencing or duplicate pairs.
    pub connections_dropped: usize,
}

/// Parses document JSON without touching any graph state.
pub fn parse_document(text: &str) -> DocumentResult<MindMapDocument> {
    serde_json::from_str(text).map_err(|err| {
        warn!("event=document_parse module=document status=error line={}", err.line());
        err.into()
    })
}

pub fn to_json_pretty<T: Serialize>(value: &T) -> DocumentResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Snapshot of the whole graph in persisted form.
///
/// Connections reference nodes by their index in the current listing.
pub fn to_document(store: &GraphStore) -> MindMapDocument {
    let indices = index_by_id(store.nodes().iter().map(|node| node.id));
    let nodes = store
        .nodes()
        .iter()
        .map(|node| DocumentNode {
            category: node.category.clone(),
            title: node.display_title().to_string(),
            notes: node.notes.clone(),
            position: node.position.into(),
        })
        .collect();
    let connections = store
        .connections()
        .iter()
        .filter_map(|connection| {
            Some(DocumentConnection {
                node_a_index: *indices.get(&connection.source)? as i64,
                node_b_index: *indices.get(&connection.target)? as i64,
            })
        })
        .collect();
    MindMapDocument { nodes, connections }
}

/// Replaces the store contents with `document`.
///
/// Nodes are recreated in document order so indices line up; connection
/// pairs that do not resolve are skipped.
pub fn apply_document(store: &mut GraphStore, document: &MindMapDocument) -> LoadReport {
    store.clear();

    let ids: Vec<NodeId> = document
        .nodes
        .iter()
        .map(|node| {
            store.create_node(
                NewNode::new(node.category.clone(), Placement::At(node.position.into()))
                    .with_title(node.title.clone())
                    .with_notes(node.notes.clone()),
            )
        })
        .collect();

    let mut report = LoadReport {
        nodes_created: ids.len(),
        ..LoadReport::default()
    };
    for pair in &document.connections {
        let resolved = resolve_index(&ids, pair.node_a_index)
            .zip(resolve_index(&ids, pair.node_b_index))
            .and_then(|(a, b)| store.create_connection(a, b));
        match resolved {
            Some(_) => report.connections_created += 1,
            None => report.connections_dropped += 1,
        }
    }

    info!(
        "event=document_apply module=document status=ok nodes={} connections={} dropped={}",
        report.nodes_created, report.connections_created, report.connections_dropped
    );
    report
}

/// Live preview limited to `filter`.
///
/// Only connections with both endpoints inside the filter are listed, and
/// their indices point into the filtered node list.
pub fn preview(store: &GraphStore, filter: &CategoryFilter) -> PreviewDocument {
    let visible: Vec<_> = store
        .nodes()
        .iter()
        .filter(|node| filter.matches(&node.category))
        .collect();
    let indices = index_by_id(visible.iter().map(|node| node.id));

    let nodes = visible
        .iter()
        .map(|node| PreviewNode {
            category: node.category.clone(),
            title: node.display_title().to_string(),
            notes: node.notes.clone(),
        })
        .collect();
    let connections = store
        .connections()
        .iter()
        .filter_map(|connection| {
            Some(DocumentConnection {
                node_a_index: *indices.get(&connection.source)? as i64,
                node_b_index: *indices.get(&connection.target)? as i64,
            })
        })
        .collect();
    PreviewDocument { nodes, connections }
}

fn index_by_id(ids: impl Iterator<Item = NodeId>) -> HashMap<NodeId, usize> {
    ids.enumerate().map(|(index, id)| (id, index)).collect()
}

fn resolve_index(ids: &[NodeId], index: i64) -> Option<NodeId> {
    usize::try_from(index)
        .ok()
        .and_then(|index| ids.get(index))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::resolve_index;
    use uuid::Uuid;

    #[test]
    fn resolve_index_rejects_negative_and_out_of_range() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        assert_eq!(resolve_index(&ids, 1), Some(ids[1]));
        assert_eq!(resolve_index(&ids, 2), None);
        assert_eq!(resolve_index(&ids, -1), None);
    }
}
