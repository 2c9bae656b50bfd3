//! Shared fixtures: tiny TIFF files carrying real EXIF tags.

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use std::io::Cursor;

fn ascii(tag: Tag, value: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![value.as_bytes().to_vec()]),
    }
}

/// A TIFF with the given `Model` (if any) and `DateTime` tags
pub fn exif_photo(model: Option<&str>, date_time: &str) -> Vec<u8> {
    let mut fields = vec![ascii(Tag::DateTime, date_time)];
    if let Some(model) = model {
        fields.push(ascii(Tag::Model, model));
    }

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).expect("write EXIF fixture");
    buf.into_inner()
}
