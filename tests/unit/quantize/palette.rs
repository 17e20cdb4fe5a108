use super::*;

#[test]
fn endpoints_are_black_and_white() {
    let p = Plan9Palette::get();
    assert_eq!(p.colors()[0], [0, 0, 0]);
    assert_eq!(p.colors()[255], [255, 255, 255]);
    assert_eq!(p.colors()[1], [0x00, 0x00, 0x44]);
    assert_eq!(p.colors()[16], [0x00, 0xdd, 0xdd]);
    assert_eq!(p.colors()[17], [0x11, 0x11, 0x11]);
}

#[test]
fn has_sixteen_grays() {
    let p = Plan9Palette::get();
    let grays: std::collections::BTreeSet<u8> = p
        .colors()
        .iter()
        .filter(|c| c[0] == c[1] && c[1] == c[2])
        .map(|c| c[0])
        .collect();
    assert_eq!(grays.len(), 16);
    assert!(grays.iter().all(|g| g % 0x11 == 0));
}

#[test]
fn palette_colors_map_to_themselves() {
    let p = Plan9Palette::get();
    for (i, c) in p.colors().iter().enumerate() {
        assert_eq!(p.colors()[usize::from(p.nearest(*c))], *c, "index {i}");
    }
}

#[test]
fn nearest_picks_closest_color() {
    let p = Plan9Palette::get();
    assert_eq!(p.nearest([250, 252, 251]), 255);
    assert_eq!(p.nearest([3, 2, 1]), 0);
    assert_eq!(p.colors()[usize::from(p.nearest([0x1a, 0x1a, 0x1a]))], [0x22, 0x22, 0x22]);
}

#[test]
fn color_map_round_trips_through_lookup() {
    let p = Plan9Palette::get();
    let mut c = Rgba([255, 3, 0, 255]);
    p.map_color(&mut c);
    let idx = p.index_of(&c);
    assert_eq!(p.lookup(idx), Some(c));
    assert!(p.has_lookup());
    assert_eq!(p.lookup(256), None);
}
