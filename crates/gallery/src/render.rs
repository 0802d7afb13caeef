use shared::models::Collection;

use crate::controller::GalleryState;

/// Render the gallery state as plain terminal text.
pub fn render_state(state: &GalleryState) -> String {
    match state {
        GalleryState::Idle => {
            "Enter a wallet address and a contract address to load a collection.".to_string()
        }
        GalleryState::Loading { .. } => "Loading collection...".to_string(),
        GalleryState::Ready(collection) => render_collection(collection),
        GalleryState::Failed { message } => format!("Collection fetch failed: {}", message),
    }
}

fn render_collection(collection: &Collection) -> String {
    if collection.items.is_empty() {
        return "No tokens held in this collection.".to_string();
    }

    let mut out = format!(
        "Collection ({} items, fetched {})\n",
        collection.items.len(),
        collection.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for item in &collection.items {
        out.push_str(&format!("\n#{} {}\n", item.token_id, item.name));
        out.push_str(&format!("  Description: {}\n", item.description));
        out.push_str(&format!("  Amount: x {}\n", item.balance));
        out.push_str(&format!("  Image: {}\n", item.image));
    }

    out
}
