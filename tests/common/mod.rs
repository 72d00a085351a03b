#![allow(dead_code)]

pub mod command;

/// Every id stored under `.git/objects`, sorted
pub fn stored_object_ids(dir: &std::path::Path) -> Vec<String> {
    let objects = dir.join(".git").join("objects");
    let mut ids = walkdir::WalkDir::new(&objects)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(&objects).ok()?;
            let id = relative.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "");
            (id.len() == 40).then_some(id)
        })
        .collect::<Vec<_>>();
    ids.sort();
    ids
}

/// Tip of master as written in the ref file
pub fn read_master(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join(".git").join("refs").join("heads").join("master"))
        .expect("master ref should exist")
}
