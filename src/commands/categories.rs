use crate::commands::Out;
use crate::model::{Category, CATEGORIES};
use crate::Result;

/// Lists the categories a transaction can be filed under.
pub async fn categories() -> Result<Out<Vec<Category>>> {
    let keys: Vec<&str> = CATEGORIES.iter().map(Category::key).collect();
    Ok(Out::new(keys.join(", "), CATEGORIES.to_vec()))
}
