use crate::domain::error::{AppError, Result};
use crate::domain::kb_payload::{Item, SchemaSelection, UploadPayload};
use crate::domain::tabular::Dataset;

/// A table name must hold at least one non-whitespace character.
pub fn validate_table_name(table_name: &str) -> Result<()> {
    if table_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a table name".to_string(),
        ));
    }
    Ok(())
}

/// Turn a dataset and the user's field choice into a table document.
///
/// Every column of every row lands in its item as text, with missing values
/// as `""`. The field lists are copied verbatim; they are not checked
/// against the dataset's columns. The only rejected input is a blank table
/// name.
pub fn build_upload_payload(
    dataset: &Dataset,
    table_name: &str,
    searchable_fields: &[String],
    metadata_fields: &[String],
) -> Result<UploadPayload> {
    validate_table_name(table_name)?;

    let items = dataset
        .records()
        .map(|record| {
            record
                .iter()
                .map(|(column, value)| (column.to_string(), value.to_item_string()))
                .collect::<Item>()
        })
        .collect();

    Ok(UploadPayload {
        schema: SchemaSelection::new(searchable_fields.to_vec(), metadata_fields.to_vec()),
        name: table_name.to_string(),
        items,
    })
}
