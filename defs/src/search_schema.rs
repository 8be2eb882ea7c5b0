use serde_json::{json, Value};

struct Field {
    name: &'static str,
    edm_type: &'static str,
    searchable: bool,
    filterable: bool,
    retrievable: bool,
    key: bool,
}

#[rustfmt::skip]
const KB_FIELDS: &[Field] = &[
    Field { name: "questionId", edm_type: "Edm.String", searchable: false, filterable: false, retrievable: true, key: true },
    Field { name: "subject1", edm_type: "Edm.String", searchable: true, filterable: false, retrievable: false, key: false },
    Field { name: "subject2", edm_type: "Edm.String", searchable: true, filterable: false, retrievable: false, key: false },
    Field { name: "subject3", edm_type: "Edm.String", searchable: true, filterable: false, retrievable: false, key: false },
    Field { name: "subject4", edm_type: "Edm.String", searchable: true, filterable: false, retrievable: false, key: false },
    Field { name: "content", edm_type: "Edm.String", searchable: true, filterable: false, retrievable: false, key: false },
    Field { name: "answerId", edm_type: "Edm.Int32", searchable: false, filterable: false, retrievable: true, key: false },
    Field { name: "instanceId", edm_type: "Edm.Int32", searchable: false, filterable: true, retrievable: true, key: false },
    Field { name: "packageId", edm_type: "Edm.Int32", searchable: false, filterable: true, retrievable: true, key: false },
];

/// Index definition for the knowledge-base questions served by the farm's search service.
pub fn get_kb_search_schema(index_name: &str) -> Value {
    let fields: Vec<Value> = KB_FIELDS
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "type": f.edm_type,
                "searchable": f.searchable,
                "filterable": f.filterable,
                "retrievable": f.retrievable,
                "sortable": false,
                "facetable": false,
                "key": f.key
            })
        })
        .collect();

    json!({
        "name": index_name,
        "fields": fields,
        "scoringProfiles": [],
        "defaultScoringProfile": null,
        "corsOptions": null
    })
}
