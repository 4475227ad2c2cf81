//! I/O helpers for binarized glyph images and JSON.
//!
//! - `load_binary_mask`: read a PNG/JPEG/etc. and threshold it into a `BinaryMask`.
//! - `save_beam_overlay`: write the mask with accepted beam items painted over it.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::BinaryMask;
use crate::beam::BeamItem;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

const BACKGROUND: u8 = 255;
const FOREGROUND: u8 = 0;
const BEAM_ITEM: u8 = 128;

/// Load an image from disk; pixels darker than `threshold` are foreground.
pub fn load_binary_mask(path: &Path, threshold: u8) -> Result<BinaryMask, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(BinaryMask::from_gray(width, height, img.as_raw(), threshold))
}

/// Save `mask` as a grayscale PNG with the body of every item filled in gray.
///
/// Items are in page coordinates; `origin` is the page position of the mask's
/// top-left pixel. Parts of items outside the mask are clipped.
pub fn save_beam_overlay(
    mask: &BinaryMask,
    origin: [i32; 2],
    items: &[BeamItem],
    path: &Path,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for y in 0..mask.h {
        for x in 0..mask.w {
            let v = if mask.get(x, y) { FOREGROUND } else { BACKGROUND };
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    for item in items {
        let north = item.north();
        let south = item.south();
        let x_start = (north.p1.x.floor() as i32 - origin[0]).max(0);
        let x_stop = (north.p2.x.ceil() as i32 - origin[0]).min(mask.w as i32);
        for x in x_start..x_stop {
            let page_x = (x + origin[0]) as f64 + 0.5;
            let top = (north.y_at_x(page_x).round() as i32 - origin[1]).max(0);
            let bottom = (south.y_at_x(page_x).round() as i32 - origin[1]).min(mask.h as i32);
            for y in top..bottom {
                out.put_pixel(x as u32, y as u32, Luma([BEAM_ITEM]));
            }
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
