//! Render consumer background task

use std::sync::Arc;

use tracing::{debug, info};

use crate::render::RenderAdapter;
use crate::state::AppState;

/// Background task forwarding published display frames to the renderer
///
/// The frame tick publishes on a watch channel, so a slow renderer only ever
/// sees the latest frame; it can never hold up the timer itself.
pub async fn render_task(state: Arc<AppState>, mut renderer: Box<dyn RenderAdapter>) {
    info!("Starting render task");

    let mut frames = state.subscribe_display();
    renderer.render(*frames.borrow_and_update());

    while frames.changed().await.is_ok() {
        let frame = *frames.borrow_and_update();
        renderer.render(frame);
    }

    debug!("Display channel closed");
}
