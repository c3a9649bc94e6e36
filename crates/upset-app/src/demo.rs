//! Built-in datasets for running without a manifest

use serde_json::{json, Value};
use upset_data::{Attribute, AttributeType, Data, DataSetInfo, InMemoryProvider, Set};

const GENRES: [&str; 5] = ["Comedy", "Drama", "Action", "Romance", "Thriller"];

const MOVIES: [(&str, i64, [u8; 5]); 16] = [
    ("Toy Story", 1995, [1, 0, 0, 0, 0]),
    ("Heat", 1995, [0, 0, 1, 0, 1]),
    ("Sabrina", 1995, [1, 0, 0, 1, 0]),
    ("GoldenEye", 1995, [0, 0, 1, 0, 1]),
    ("Casino", 1995, [0, 1, 0, 0, 1]),
    ("Sense and Sensibility", 1995, [0, 1, 0, 1, 0]),
    ("Four Rooms", 1995, [1, 0, 0, 0, 1]),
    ("Get Shorty", 1995, [1, 1, 1, 0, 0]),
    ("Copycat", 1995, [0, 1, 0, 0, 1]),
    ("Persuasion", 1995, [0, 0, 0, 1, 0]),
    ("Clueless", 1995, [1, 0, 0, 1, 0]),
    ("Braveheart", 1995, [0, 1, 1, 0, 0]),
    ("Apollo 13", 1995, [0, 1, 0, 0, 0]),
    ("Rob Roy", 1995, [0, 1, 1, 1, 0]),
    ("Babe", 1995, [1, 1, 0, 0, 0]),
    ("Dead Man Walking", 1995, [0, 1, 0, 0, 0]),
];

const MUTATIONS: [(&str, i64, [u8; 3]); 8] = [
    ("P-01", 61, [1, 1, 0]),
    ("P-02", 47, [1, 0, 0]),
    ("P-03", 72, [0, 1, 1]),
    ("P-04", 55, [1, 1, 1]),
    ("P-05", 38, [0, 0, 1]),
    ("P-06", 66, [1, 0, 1]),
    ("P-07", 59, [0, 0, 0]),
    ("P-08", 44, [1, 1, 0]),
];

fn build<const N: usize>(name: &str, set_names: &[&str; N], rows: &[(&str, i64, [u8; N])], value_name: &str) -> Data {
    let sets = set_names
        .iter()
        .enumerate()
        .map(|(column, set_name)| {
            let items = rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row.2[column] == 1)
                .map(|(item, _)| item)
                .collect();
            Set::new(column, *set_name, items)
        })
        .collect();

    let names: Vec<Value> = rows.iter().map(|row| json!(row.0)).collect();
    let values: Vec<Value> = rows.iter().map(|row| json!(row.1)).collect();
    let memberships: Vec<Value> = rows
        .iter()
        .map(|row| {
            let member_of: Vec<&str> = set_names
                .iter()
                .zip(row.2.iter())
                .filter(|(_, flag)| **flag == 1)
                .map(|(set, _)| *set)
                .collect();
            json!(member_of)
        })
        .collect();

    let attributes = vec![
        Attribute::new("Name", AttributeType::Id, names),
        Attribute::new(value_name, AttributeType::Integer, values),
        Attribute::new("Sets", AttributeType::Sets, memberships),
    ];
    Data::new(name, sets, attributes, rows.len())
}

/// Demo datasets with their selector entries
pub fn datasets() -> Vec<(DataSetInfo, Data)> {
    let movies = build("Movies", &GENRES, &MOVIES, "ReleaseDate");
    let mutations = build("Mutations", &["TP53", "KRAS", "EGFR"], &MUTATIONS, "Age");

    [
        (movies, "movies.csv", "Genres of a handful of 1995 releases"),
        (mutations, "mutations.csv", "Co-occurring driver mutations per patient"),
    ]
    .into_iter()
    .map(|(data, file, description)| {
        let info = DataSetInfo {
            name: data.name.clone(),
            file: file.to_string(),
            set_count: data.sets.len(),
            attribute_count: data.valid_attributes().len(),
            author: "upset".to_string(),
            description: description.to_string(),
            source: "built-in".to_string(),
        };
        (info, data)
    })
    .collect()
}

/// Provider serving the demo datasets, and their selector entries
pub fn provider() -> (InMemoryProvider, Vec<DataSetInfo>) {
    let provider = InMemoryProvider::new();
    let infos = datasets()
        .into_iter()
        .map(|(info, data)| {
            provider.insert(data);
            info
        })
        .collect();
    (provider, infos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use upset_data::DataProvider;

    #[test]
    fn test_memberships_match_sets() {
        let movies = &datasets()[0].1;
        assert_eq!(movies.sets.len(), 5);
        assert_eq!(movies.item_count, 16);
        // Get Shorty is a comedy, a drama and an action film
        assert!(movies.sets[0].items.contains(&7));
        assert!(movies.sets[1].items.contains(&7));
        assert!(movies.sets[2].items.contains(&7));
        assert_eq!(movies.sets[3].set_size(), 5);
    }

    #[test]
    fn test_provider_serves_every_dataset() {
        let (provider, infos) = provider();
        assert_eq!(provider.names(), vec!["Movies", "Mutations"]);
        for info in &infos {
            assert!(provider.load(info).is_ok());
        }
        assert_eq!(infos[1].set_count, 3);
        assert_eq!(infos[1].attribute_count, 2);
    }
}
