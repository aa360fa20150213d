/// Table name for an uploaded file: the file name without its last
/// extension. Dots inside the base name survive (`sample.name.csv` gives
/// `sample.name`); a name without a dot comes back unchanged.
pub fn extract_table_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((base, _extension)) => base.to_string(),
        None => file_name.to_string(),
    }
}
