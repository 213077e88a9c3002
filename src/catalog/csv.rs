//! Menu file adapter.
//!
//! Reads and writes the tabular menu file:
//!
//! ```text
//! name,prep_time,type,ingredients
//! Patatas Bravas,8,tapas,"potato, paprika"
//! Paella,35,main dish,"rice, saffron, chicken"
//! ```
//!
//! `type` accepts `tapas`/`main dish` as well as `quick`/`slow`; files are
//! written with the menu labels. Ingredients are one comma-separated field.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::{Menu, MenuCatalog};
use crate::error::CatalogError;
use crate::models::{Dish, DishCategory};

const HEADER: [&str; 4] = ["name", "prep_time", "type", "ingredients"];

#[derive(Debug, Deserialize)]
struct MenuRecord {
    name: String,
    prep_time: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    ingredients: String,
}

fn menu_label(category: DishCategory) -> &'static str {
    match category {
        DishCategory::Quick => "tapas",
        DishCategory::Slow => "main dish",
    }
}

/// Parses dishes from CSV. Records are numbered from 1, header excluded.
pub fn read_menu<R: Read>(reader: R) -> Result<Vec<Dish>, CatalogError> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let mut dishes = Vec::new();
    for (index, row) in rdr.deserialize::<MenuRecord>().enumerate() {
        let record = index + 1;
        let row = row?;

        let prep_minutes: u32 =
            row.prep_time
                .parse()
                .map_err(|_| CatalogError::InvalidPrepTime {
                    record,
                    value: row.prep_time.clone(),
                })?;
        let category: DishCategory =
            row.kind
                .parse()
                .map_err(|_| CatalogError::UnknownCategory {
                    record,
                    value: row.kind.clone(),
                })?;
        let ingredients = row
            .ingredients
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty());

        dishes.push(Dish::new(row.name, prep_minutes, category).with_ingredients(ingredients));
    }
    Ok(dishes)
}

/// Writes dishes as CSV, header first (also for an empty menu).
pub fn write_menu<W: Write>(writer: W, dishes: &[Arc<Dish>]) -> Result<(), CatalogError> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for dish in dishes {
        let prep = dish.prep_minutes.to_string();
        let ingredients = dish.ingredients.join(", ");
        wtr.write_record([
            dish.name.as_str(),
            prep.as_str(),
            menu_label(dish.category),
            ingredients.as_str(),
        ])?;
    }
    wtr.flush().map_err(::csv::Error::from)?;
    Ok(())
}

/// Loads a menu file.
///
/// A missing file yields an empty menu.
pub fn load_menu(path: impl AsRef<Path>) -> Result<Menu, CatalogError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "menu file not found, starting with an empty menu");
            return Ok(Menu::new());
        }
        Err(source) => {
            return Err(CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let menu = Menu::from_dishes(read_menu(file)?)?;
    info!(path = %path.display(), dishes = menu.len(), "menu loaded");
    Ok(menu)
}

/// Writes a menu file, replacing any existing one.
pub fn save_menu(path: impl AsRef<Path>, menu: &Menu) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_menu(file, &menu.list_dishes())?;
    info!(path = %path.display(), dishes = menu.len(), "menu saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
name,prep_time,type,ingredients
Patatas Bravas,8,tapas,\"potato, paprika\"
Paella,35,main dish,\"rice,saffron , chicken\"
Croquetas, 6 ,quick,ham
";

    #[test]
    fn test_read_menu() {
        let dishes = read_menu(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dishes.len(), 3);

        assert_eq!(dishes[0].name, "Patatas Bravas");
        assert_eq!(dishes[0].category, DishCategory::Quick);
        assert_eq!(dishes[0].ingredients, vec!["potato", "paprika"]);

        assert_eq!(dishes[1].prep_minutes, 35);
        assert_eq!(dishes[1].category, DishCategory::Slow);
        assert_eq!(dishes[1].ingredients, vec!["rice", "saffron", "chicken"]);

        assert_eq!(dishes[2].prep_minutes, 6);
        assert_eq!(dishes[2].ingredients, vec!["ham"]);
    }

    #[test]
    fn test_read_menu_bad_prep_time() {
        let data = "name,prep_time,type,ingredients\nOlives,2,tapas,olives\nTortilla,ten,tapas,egg\n";
        let err = read_menu(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidPrepTime { record: 2, ref value } if value == "ten"
        ));
    }

    #[test]
    fn test_read_menu_unknown_type() {
        let data = "name,prep_time,type,ingredients\nFlan,5,dessert,egg\n";
        assert!(matches!(
            read_menu(data.as_bytes()),
            Err(CatalogError::UnknownCategory { record: 1, .. })
        ));
    }

    #[test]
    fn test_write_menu_header_only_when_empty() {
        let mut out = Vec::new();
        write_menu(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "name,prep_time,type,ingredients\n");
    }

    #[test]
    fn test_write_uses_menu_labels() {
        let dishes = vec![Arc::new(
            Dish::slow("Paella", 35).with_ingredients(["rice", "saffron"]),
        )];
        let mut out = Vec::new();
        write_menu(&mut out, &dishes).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Paella,35,main dish,\"rice, saffron\""));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Menu.csv");

        let menu = Menu::from_dishes(read_menu(SAMPLE.as_bytes()).unwrap()).unwrap();
        save_menu(&path, &menu).unwrap();

        let loaded = load_menu(&path).unwrap();
        let names: Vec<String> = loaded.list_dishes().iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["Patatas Bravas", "Paella", "Croquetas"]);
        assert_eq!(
            loaded.find_dish("Paella").map(|d| d.ingredients.clone()),
            Some(vec!["rice".into(), "saffron".into(), "chicken".into()])
        );
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let menu = load_menu(dir.path().join("nope.csv")).unwrap();
        assert!(menu.is_empty());
    }

    #[test]
    fn test_load_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Menu.csv");
        std::fs::write(
            &path,
            "name,prep_time,type,ingredients\nOlives,2,tapas,olives\nOlives,3,tapas,olives\n",
        )
        .unwrap();
        assert!(matches!(
            load_menu(&path),
            Err(CatalogError::DuplicateDish(_))
        ));
    }
}
