//! Reference Locator (C7, §4.5).
//!
//! Fans one task out per non-placeholder workspace file, each task asking
//! its file's [`LinkResult::find_references`] for hits against a descriptor
//! and deduplicating by stringified reference key, streaming the survivors
//! over an unbounded channel (§5's reference-fan-out concurrency model).

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use proto_ast::NodeId;
use proto_descriptor::{Descriptor, LinkResult};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// A `LinkResult` shareable across the fan-out's spawned tasks.
pub type SharedFile = Arc<dyn LinkResult + Send + Sync>;

/// One reference hit: which file it was found in (by index into the slice
/// passed to [`find_references`]) and the AST node that references the
/// descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundReference {
    /// Index into the `files` slice [`find_references`] was called with.
    pub file_index: usize,
    /// The referencing node within that file's AST.
    pub node: NodeId,
}

/// Streams every reference to `descriptor` across `files`.
///
/// Placeholder files (failed parse/link) are skipped outright. The returned
/// receiver closes once every spawned task has finished and dropped its
/// sender clone — no task explicitly closes the channel, matching the "the
/// closer task only runs after all producers have released their handles"
/// requirement.
pub fn find_references(files: &[SharedFile], descriptor: Descriptor) -> mpsc::UnboundedReceiver<FoundReference> {
    let (tx, rx) = mpsc::unbounded_channel();
    let seen: Arc<Mutex<HashSet<String>>> = Arc::new(Mutex::new(HashSet::new()));
    let mut tasks = JoinSet::new();

    for (file_index, file) in files.iter().cloned().enumerate() {
        if file.is_placeholder() {
            continue;
        }
        let tx = tx.clone();
        let seen = Arc::clone(&seen);
        let descriptor = descriptor.clone();
        tasks.spawn(async move {
            for node in file.find_references(&descriptor) {
                let key = format!("{file_index}:{node:?}");
                let is_new = seen.lock().unwrap_or_else(std::sync::PoisonError::into_inner).insert(key);
                if is_new && tx.send(FoundReference { file_index, node }).is_err() {
                    break;
                }
            }
        });
    }

    // Drop this function's own sender; the rest live only inside the spawned
    // tasks above, so the channel closes once they all finish.
    drop(tx);

    tokio::spawn(async move {
        while tasks.join_next().await.is_some() {}
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto_ast::{AstBuilder, NodeKind};
    use proto_descriptor::TableLinkResult;
    use proto_position_tracking::ByteSpan;
    use proto_tdd_support::fixtures::single_message_pool;

    fn empty_ast() -> proto_ast::Ast {
        let mut b = AstBuilder::new();
        let file = b.push(NodeKind::File, ByteSpan::new(0, 0), vec![]);
        b.build(file)
    }

    #[tokio::test]
    async fn dedupes_repeated_references_within_one_file() {
        let (file_desc, message) = single_message_pool("pkg", "Widget");
        let ast = empty_ast();
        let dup_node = AstBuilder::new().push(NodeKind::Ident, ByteSpan::new(0, 1), vec![]);
        let link: SharedFile = Arc::new(
            TableLinkResult::builder(ast, file_desc)
                .reference("pkg.Widget", dup_node)
                .reference("pkg.Widget", dup_node)
                .build(),
        );

        let mut rx = find_references(&[link], Descriptor::Message(message));
        let mut found = Vec::new();
        while let Some(hit) = rx.recv().await {
            found.push(hit);
        }
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].node, dup_node);
    }

    #[tokio::test]
    async fn skips_placeholder_files() {
        let (file_desc, message) = single_message_pool("pkg", "Widget");
        let node = AstBuilder::new().push(NodeKind::Ident, ByteSpan::new(0, 1), vec![]);
        let link: SharedFile = Arc::new(
            TableLinkResult::builder(empty_ast(), file_desc)
                .reference("pkg.Widget", node)
                .placeholder(true)
                .build(),
        );

        let mut rx = find_references(&[link], Descriptor::Message(message));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn fans_out_across_multiple_files() {
        let (file_desc, message) = single_message_pool("pkg", "Widget");
        let node_a = AstBuilder::new().push(NodeKind::Ident, ByteSpan::new(0, 1), vec![]);
        let node_b = AstBuilder::new().push(NodeKind::Ident, ByteSpan::new(1, 2), vec![]);
        let a: SharedFile =
            Arc::new(TableLinkResult::builder(empty_ast(), file_desc.clone()).reference("pkg.Widget", node_a).build());
        let b: SharedFile =
            Arc::new(TableLinkResult::builder(empty_ast(), file_desc).reference("pkg.Widget", node_b).build());

        let mut rx = find_references(&[a, b], Descriptor::Message(message));
        let mut found = Vec::new();
        while let Some(hit) = rx.recv().await {
            found.push(hit.node);
        }
        found.sort_by_key(|n| format!("{n:?}"));
        let mut expected = vec![node_a, node_b];
        expected.sort_by_key(|n| format!("{n:?}"));
        assert_eq!(found, expected);
    }
}
