//! JSON plan output, including the editor layout descriptor.

use crate::plan::SplitPlan;
use serde_json::Value;

pub fn render_json(plan: &SplitPlan) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(plan)?;
    if let Value::Object(map) = &mut value {
        map.insert("editor_layout".to_string(), plan.layout.editor_layout());
    }
    serde_json::to_string_pretty(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Config;
    use crate::plan::SplitPlanner;
    use crate::scan::MemoryFs;
    use std::path::Path;

    #[test]
    fn test_render_json_shape() {
        let fs = MemoryFs::new()
            .with_file("/w/.splitignore", "skip.txt\n")
            .with_file("/w/a.txt", "a")
            .with_file("/w/skip.txt", "s")
            .with_file("/w/b.txt", "b");
        let config = Config::default();
        let plan = SplitPlanner::new(&fs, &config, Path::new("/w"))
            .plan(&["/w/a.txt", "/w/skip.txt", "/w/b.txt"])
            .unwrap();

        let value: Value = serde_json::from_str(&render_json(&plan).unwrap()).unwrap();
        assert_eq!(value["layout"]["columns"], 2);
        assert_eq!(value["layout"]["rows"], 1);
        assert_eq!(value["panes"][1]["relative_path"], "b.txt");
        assert_eq!(value["panes"][1]["group"], 2);
        assert_eq!(value["ignore_file"], "/w/.splitignore");
        assert_eq!(value["truncated_from"], Value::Null);
        assert_eq!(value["editor_layout"]["groups"][0]["groups"].as_array().map(Vec::len), Some(2));
    }
}
