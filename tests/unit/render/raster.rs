use super::*;
use crate::foundation::core::Canvas;
use crate::render::surface::{Surface, SurfaceDesc, SurfaceId};

fn surface(w: u32, h: u32) -> Surface {
    let desc = SurfaceDesc::default().with_canvas(Canvas::new(w, h).unwrap());
    Surface::allocate(SurfaceId(0), desc).unwrap()
}

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn empty_tree_leaves_surface_transparent() {
    let tree = LayerTree::new(0);
    let mut s = surface(8, 8);
    rasterize(&tree, &mut s).unwrap();
    let frame = read_frame(&s);
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn opaque_rect_fills_its_pixels_only() {
    let mut tree = LayerTree::new(0);
    let root = tree.root();
    tree.draw(root, "block", |g| {
        g.rect(2.0, 2.0, 4.0, 4.0, Rgb8::hex(0xff0000));
    })
    .unwrap();
    let mut s = surface(8, 8);
    rasterize(&tree, &mut s).unwrap();
    let frame = read_frame(&s);
    assert_eq!(px(&frame, 3, 3), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 0, 0), [0, 0, 0, 0]);
    assert_eq!(px(&frame, 7, 7), [0, 0, 0, 0]);
}

#[test]
fn zero_alpha_group_is_not_painted() {
    let mut tree = LayerTree::new(0);
    let root = tree.root();
    let hidden = tree.add_group(root, "hidden").unwrap();
    tree.draw(hidden, "block", |g| {
        g.rect(0.0, 0.0, 8.0, 8.0, Rgb8::hex(0xffffff));
    })
    .unwrap();
    tree.set_alpha(hidden, 0.0);
    let mut s = surface(8, 8);
    rasterize(&tree, &mut s).unwrap();
    assert!(read_frame(&s).data.iter().all(|&b| b == 0));
}

#[test]
fn half_alpha_group_halves_coverage() {
    let mut tree = LayerTree::new(0);
    let root = tree.root();
    tree.draw(root, "block", |g| {
        g.rect(0.0, 0.0, 8.0, 8.0, Rgb8::hex(0xffffff));
    })
    .unwrap();
    tree.set_alpha(root, 0.5);
    let mut s = surface(8, 8);
    rasterize(&tree, &mut s).unwrap();
    let a = px(&read_frame(&s), 4, 4)[3];
    assert!((120..=135).contains(&a), "alpha was {a}");
}

#[test]
fn nearest_upscale_duplicates_pixels() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 0, 255, 255],
        premultiplied: true,
    };
    let up = upscale_nearest(&frame, 3).unwrap();
    assert_eq!((up.width, up.height), (6, 3));
    assert_eq!(px(&up, 0, 0), [255, 0, 0, 255]);
    assert_eq!(px(&up, 2, 2), [255, 0, 0, 255]);
    assert_eq!(px(&up, 3, 0), [0, 0, 255, 255]);
    assert!(upscale_nearest(&frame, 0).is_err());
}

#[test]
fn straight_conversion_undoes_premultiply() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    let s = frame.to_straight();
    assert!(!s.premultiplied);
    assert_eq!(s.data, vec![128, 0, 0, 128]);
}
