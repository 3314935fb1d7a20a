//! Headless walkthrough of the toolkit: builds a bordered layout, pokes it
//! with a few synthetic events, and prints what the backend would rasterize.
//!
//! Run with `RUST_LOG=debug` to watch the markup compiler and atlas decoder.

use patchkit::{
    AtlasMetrics, Container, Device, Layout, MouseEvent, Rect, RecordingBackend, Root, Text, Tree,
};

fn main() {
    env_logger::init();

    let mut dev = Device::new(RecordingBackend::new(800, 600), AtlasMetrics::uniform(8, 8));
    let mut tree = Tree::new();

    let top = tree.create(Container::new().size(0, 50).background(true));
    let bottom = tree.create(Container::new().size(0, 50).background(true));
    let left = tree.create(Container::new().size(50, 0).background(true));
    let right = tree.create(Container::new().size(50, 0).background(true));
    let message = tree.create(Text::new("The quick brown fox jumped over the lazy dog!"));
    let center = tree.create(Container::new().background(true).child(message));
    let layout = tree.create(
        Layout::new()
            .top(top)
            .bottom(bottom)
            .left(left)
            .right(right)
            .center(center),
    );
    let body = tree.create(Root::new().child(layout));

    // a frame: route input against last frame's bounds, then draw and flush
    tree.route_mouse(&mut dev, &MouseEvent::moved(400, 300), body, Rect::default());
    tree.draw(&mut dev, body, Rect::default());
    dev.flush();

    let backend = dev.backend();
    println!("center slot resolved to {:?}", tree.bounds_of(center));
    println!(
        "frame emitted {} blits, {} clip changes",
        backend.blits.len(),
        backend.clips.len()
    );
}
