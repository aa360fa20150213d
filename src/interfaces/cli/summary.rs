use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::domain::kb_payload::UploadPreview;

pub fn print_preview(preview: &UploadPreview) {
    println!("Table name: {}", preview.table_name);
    println!("Total rows: {}", preview.total_rows);
    if preview.sample.is_empty() {
        println!("(no rows)");
        return;
    }
    println!("Preview of first {} rows:", preview.sample.len());
    println!("{}", preview_table(preview));
}

pub fn preview_table(preview: &UploadPreview) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        preview
            .columns
            .iter()
            .map(|column| Cell::new(column).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    for item in &preview.sample {
        table.add_row(
            preview
                .columns
                .iter()
                .map(|column| item.get(column).cloned().unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    table
}
