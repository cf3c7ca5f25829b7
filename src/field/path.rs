use super::definition::FieldDefinition;

/// Resolves a dotted path (`"customer.address.zip"`) against a field list,
/// descending through `children` between segments. Returns `None` as soon
/// as any segment fails to resolve.
pub fn find_field_by_path<'a>(
    fields: &'a [FieldDefinition],
    path: &str,
) -> Option<&'a FieldDefinition> {
    let mut current = fields;
    let mut found = None;
    for segment in path.split('.') {
        let field = current.iter().find(|f| f.name == segment)?;
        current = &field.children;
        found = Some(field);
    }
    found
}

/// The last segment of a dotted path (`"profile.full_name"` -> `"full_name"`).
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
