//! End-to-end scenarios exercising layout, drawing, events, and the markup
//! compiler together through the public API.

use patchkit::{
    AtlasMetrics, Button, ButtonState, Column, Container, Device, EditCommand, Key, KeyboardEvent,
    Layout, MouseEvent, Rect, RecordingBackend, Root, Slider, Text, Tree,
};

fn device() -> Device<RecordingBackend> {
    // uniform 8px cells with the default -4 spacing: 4px per glyph
    Device::new(RecordingBackend::new(800, 600), AtlasMetrics::uniform(8, 8))
}

#[test]
fn test_bordered_layout_center_gets_the_remainder() {
    let mut dev = device();
    let mut tree = Tree::new();
    let top = tree.create(Container::new().size(0, 50).background(true));
    let bottom = tree.create(Container::new().size(0, 50).background(true));
    let left = tree.create(Container::new().size(50, 0).background(true));
    let right = tree.create(Container::new().size(50, 0).background(true));
    let center = tree.create(Container::new().background(true));
    let layout = tree.create(
        Layout::new()
            .top(top)
            .bottom(bottom)
            .left(left)
            .right(right)
            .center(center),
    );
    let body = tree.create(Root::new().child(layout));

    tree.resolve_bounds(&mut dev, body, Rect::default());
    assert_eq!(tree.bounds_of(center), Rect::new(49, 49, 702, 502));
}

#[test]
fn test_first_draw_needs_no_explicit_layout() {
    let mut dev = device();
    let mut tree = Tree::new();
    let message = tree.create(Text::new("hello"));
    let center = tree.create(Container::new().background(true).child(message));
    let body = tree.create(Root::new().child(center));

    tree.draw(&mut dev, body, Rect::default());
    dev.flush();

    assert_eq!(tree.bounds_of(center), Rect::new(0, 0, 800, 600));
    // background patch plus the five glyphs
    assert_eq!(dev.backend().blits.len(), 9 + 5);
}

#[test]
fn test_parsed_button_click_scenario() {
    let mut dev = device();
    let mut tree = Tree::new();
    let body = patchkit::markup::compile(
        &mut tree,
        r#"Root(child: Button(text: "OK", id: "b"))"#,
    )
    .unwrap();

    use std::cell::Cell;
    use std::rc::Rc;
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();
    tree.get_named_mut::<Button>("b").unwrap().on_pressed =
        Some(Box::new(move || seen.set(seen.get() + 1)));

    tree.resolve_bounds(&mut dev, body, Rect::default());
    let inside = tree.bounds_of(tree.wid("b").unwrap());
    let (px, py) = (inside.x + inside.width / 2, inside.y + inside.height / 2);

    tree.route_mouse(&mut dev, &MouseEvent::moved(px, py), body, Rect::default());
    tree.route_mouse(&mut dev, &MouseEvent::down(px, py), body, Rect::default());
    tree.route_mouse(&mut dev, &MouseEvent::up(px, py), body, Rect::default());

    let button = tree.get_named::<Button>("b").unwrap();
    assert_eq!(button.state, ButtonState::Hover);
    assert_eq!(tree.focus(), tree.wid("b"));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_parsed_centered_text_offset() {
    let mut dev = device();
    let mut tree = Tree::new();
    let c = patchkit::markup::compile(
        &mut tree,
        r#"Container(width: 100, child: Text(text: "abc", align: CENTER))"#,
    )
    .unwrap();

    let allocation = Rect::new(0, 0, 100, 8);
    tree.resolve_bounds(&mut dev, c, allocation);
    tree.draw(&mut dev, c, allocation);
    dev.flush();

    // 50 - measured("abc")/2, with measured("abc") = 12
    assert_eq!(dev.backend().blits[0].dst.x, 44);
}

#[test]
fn test_column_offsets_accumulate_heights_and_spacing() {
    let mut dev = device();
    let mut tree = Tree::new();
    let a = tree.create(Text::new("one"));
    let b = tree.create(Text::new("two"));
    let c = tree.create(Text::new("three"));
    let column = tree.create(Column::new().spacing(3).children([a, b, c]));

    tree.resolve_bounds(&mut dev, column, Rect::new(0, 0, 200, 600));

    let first_height = tree.bounds_of(a).height;
    let second_height = tree.bounds_of(b).height;
    assert_eq!(tree.bounds_of(b).y, first_height + 3);
    assert_eq!(tree.bounds_of(c).y, first_height + second_height + 6);
}

#[test]
fn test_slider_drag_through_a_full_tree() {
    let mut dev = device();
    let mut tree = Tree::new();

    use std::cell::RefCell;
    use std::rc::Rc;
    let changes = Rc::new(RefCell::new(Vec::new()));
    let seen = changes.clone();
    let slider = tree.create(
        Slider::new()
            .range(0, 100)
            .on_change(move |v| seen.borrow_mut().push(v)),
    );
    let body = tree.create(Root::new().child(slider));

    tree.resolve_bounds(&mut dev, body, Rect::default());
    let bounds = tree.bounds_of(slider);
    let y = bounds.y + bounds.height / 2;

    tree.route_mouse(&mut dev, &MouseEvent::down(bounds.x + 8, y), body, Rect::default());
    tree.route_mouse(&mut dev, &MouseEvent::moved(2000, y), body, Rect::default());
    tree.route_mouse(&mut dev, &MouseEvent::up(2000, y), body, Rect::default());

    // dragging off the edge clamps and then stops reporting
    let value = tree.get::<Slider>(slider).unwrap().value;
    assert_eq!(value, 0);
    assert!(changes.borrow().iter().all(|v| (0..=100).contains(v)));
}

#[test]
fn test_input_round_trip_through_focus_routing() {
    let mut dev = device();
    let mut tree = Tree::new();
    let input = tree.create(patchkit::Input::new().text("seed"));
    let body = tree.create(Root::new().child(input));

    tree.resolve_bounds(&mut dev, body, Rect::default());
    let bounds = tree.bounds_of(input);
    tree.route_mouse(
        &mut dev,
        &MouseEvent::down(bounds.x + 5, bounds.y + 5),
        body,
        Rect::default(),
    );
    assert_eq!(tree.focus(), Some(input));

    tree.route_keyboard(&mut dev, &KeyboardEvent::KeyDown(Key::End));
    for c in "123".chars() {
        tree.route_keyboard(&mut dev, &KeyboardEvent::TextType(c));
    }
    assert_eq!(tree.get::<patchkit::Input>(input).unwrap().text, "seed123");

    for _ in 0..3 {
        tree.route_keyboard(&mut dev, &KeyboardEvent::KeyDown(Key::Backspace));
    }
    let field = tree.get::<patchkit::Input>(input).unwrap();
    assert_eq!(field.text, "seed");
    assert_eq!(field.cursor(), 4);
}

#[test]
fn test_paste_lands_at_the_caret() {
    let mut dev = device();
    dev.backend_mut().clipboard = "-copy".into();
    let mut tree = Tree::new();
    let input = tree.create(patchkit::Input::new().text("ab"));
    tree.resolve_bounds(&mut dev, input, Rect::new(0, 0, 200, 22));
    tree.set_focus(Some(input));

    tree.route_keyboard(&mut dev, &KeyboardEvent::KeyDown(Key::End));
    tree.route_keyboard(&mut dev, &KeyboardEvent::Command(EditCommand::Paste));
    assert_eq!(tree.get::<patchkit::Input>(input).unwrap().text, "ab-copy");
}

#[test]
fn test_events_outside_a_background_container_never_reach_the_button() {
    let mut dev = device();
    let mut tree = Tree::new();
    let button = tree.create(Button::new("hit me"));
    let boxed = tree.create(
        Container::new()
            .size(100, 100)
            .background(true)
            .child(button),
    );
    let body = tree.create(Root::new().child(boxed));

    tree.resolve_bounds(&mut dev, body, Rect::default());

    tree.route_mouse(&mut dev, &MouseEvent::moved(300, 300), body, Rect::default());
    tree.route_mouse(&mut dev, &MouseEvent::down(300, 300), body, Rect::default());

    assert_eq!(
        tree.get::<Button>(button).unwrap().state,
        ButtonState::Normal
    );
    assert!(tree.focus().is_none());
}

#[test]
fn test_slider_balloon_paints_above_container_backgrounds() {
    let mut dev = device();
    let mut tree = Tree::new();
    let slider = tree.create(Slider::new().value(42));
    let boxed = tree.create(Container::new().background(true).child(slider));
    let body = tree.create(Root::new().child(boxed));

    tree.resolve_bounds(&mut dev, body, Rect::default());
    tree.get_mut::<Slider>(slider).unwrap().state = ButtonState::Pressed;
    tree.draw(&mut dev, body, Rect::default());
    dev.flush();

    // "42" is two glyphs; the last two blits must be the balloon text even
    // though the container's background was emitted after the order push
    let blits = &dev.backend().blits;
    let last = blits.last().unwrap();
    let glyph_cell = 8;
    // '2' = 0x32: column 2, row 3 of the atlas grid
    assert_eq!(last.src, Rect::new(2 * glyph_cell, 3 * glyph_cell, 8, 8));
}
