use env_defs::{get_kb_search_schema, SEARCH_INDEX};

pub fn handle_search_schema(index: Option<&str>) -> Result<(), anyhow::Error> {
    let schema = get_kb_search_schema(index.unwrap_or(SEARCH_INDEX));
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
