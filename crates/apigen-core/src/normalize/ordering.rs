//! Name deduplication, deterministic ordering and pruning

use crate::model::{ApiController, ApiParameter};

/// Return `name`, or `name_1`, `name_2`, ... whichever is the first not yet taken
pub fn dedupe_name<'a, I>(name: &str, taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = taken.into_iter().collect();
    if !taken.contains(&name) {
        return name.to_string();
    }
    (1..)
        .map(|i| format!("{name}_{i}"))
        .find(|candidate| !taken.contains(&candidate.as_str()))
        .unwrap_or_else(|| name.to_string())
}

/// Required parameters first, declaration order kept within each group
pub fn required_first(parameters: &mut [ApiParameter]) {
    parameters.sort_by_key(|p| !p.required);
}

/// Sort every controller's methods by name, descending, and drop controllers without methods.
///
/// Request mocks match methods in order, so a longer name has to come before any
/// shorter name it starts with.
pub fn finalize(controllers: Vec<ApiController>) -> Vec<ApiController> {
    controllers
        .into_iter()
        .filter_map(|mut controller| {
            if controller.methods.is_empty() {
                log::debug!("Dropping controller {} without methods", controller.name);
                return None;
            }
            controller.methods.sort_by(|a, b| b.name.cmp(&a.name));
            Some(controller)
        })
        .collect()
}
