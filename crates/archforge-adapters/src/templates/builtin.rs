//! Templates and descriptors compiled into the binary.

use archforge_core::error::ArchforgeResult;

use super::TemplateSource;

macro_rules! builtin {
    ($id:literal) => {
        ($id, include_str!(concat!("../../templates/", $id)))
    };
}

/// `(id, text)` for every built-in resource.
pub static BUILTIN: &[(&str, &str)] = &[
    builtin!("adapters/driven-adapters/generic/Adapter.java.tpl"),
    builtin!("adapters/driven-adapters/generic/metadata.yml"),
    builtin!("adapters/entry-points/generic/Handler.java.tpl"),
    builtin!("adapters/entry-points/generic/metadata.yml"),
    builtin!("architectures/hexagonal-multi-granular/structure.yml"),
    builtin!("architectures/hexagonal-multi/structure.yml"),
    builtin!("architectures/hexagonal-single/structure.yml"),
    builtin!("architectures/onion-multi/structure.yml"),
    builtin!("architectures/onion-single/structure.yml"),
    builtin!("components/entity/Entity.java.tpl"),
    builtin!("components/usecase/UseCasePort.java.tpl"),
    builtin!("frameworks/spring/imperative/adapters/driven-adapters/mongodb/Adapter.java.tpl"),
    builtin!("frameworks/spring/imperative/adapters/driven-adapters/mongodb/Data.java.tpl"),
    builtin!("frameworks/spring/imperative/adapters/driven-adapters/mongodb/Mapper.java.tpl"),
    builtin!("frameworks/spring/imperative/adapters/driven-adapters/mongodb/metadata.yml"),
    builtin!("frameworks/spring/imperative/adapters/driven-adapters/redis/Adapter.java.tpl"),
    builtin!("frameworks/spring/imperative/adapters/driven-adapters/redis/Data.java.tpl"),
    builtin!("frameworks/spring/imperative/adapters/driven-adapters/redis/Mapper.java.tpl"),
    builtin!("frameworks/spring/imperative/adapters/driven-adapters/redis/metadata.yml"),
    builtin!("frameworks/spring/imperative/adapters/entry-points/rest/Controller.java.tpl"),
    builtin!("frameworks/spring/imperative/adapters/entry-points/rest/metadata.yml"),
    builtin!("frameworks/spring/imperative/project/Application.java.tpl"),
    builtin!("frameworks/spring/imperative/project/application.yml.tpl"),
    builtin!("frameworks/spring/imperative/project/build.gradle.kts.tpl"),
    builtin!("frameworks/spring/imperative/usecase/UseCaseImpl.java.tpl"),
    builtin!("frameworks/spring/reactive/adapters/driven-adapters/mongodb/Adapter.java.tpl"),
    builtin!("frameworks/spring/reactive/adapters/driven-adapters/mongodb/Data.java.tpl"),
    builtin!("frameworks/spring/reactive/adapters/driven-adapters/mongodb/Mapper.java.tpl"),
    builtin!("frameworks/spring/reactive/adapters/driven-adapters/mongodb/metadata.yml"),
    builtin!("frameworks/spring/reactive/adapters/driven-adapters/redis/Adapter.java.tpl"),
    builtin!("frameworks/spring/reactive/adapters/driven-adapters/redis/Data.java.tpl"),
    builtin!("frameworks/spring/reactive/adapters/driven-adapters/redis/Mapper.java.tpl"),
    builtin!("frameworks/spring/reactive/adapters/driven-adapters/redis/metadata.yml"),
    builtin!("frameworks/spring/reactive/adapters/entry-points/rest/Controller.java.tpl"),
    builtin!("frameworks/spring/reactive/adapters/entry-points/rest/metadata.yml"),
    builtin!("frameworks/spring/reactive/project/Application.java.tpl"),
    builtin!("frameworks/spring/reactive/project/application.yml.tpl"),
    builtin!("frameworks/spring/reactive/project/build.gradle.kts.tpl"),
    builtin!("frameworks/spring/reactive/usecase/UseCaseImpl.java.tpl"),
    builtin!("project/README.md.tpl"),
    builtin!("project/adapter-build.gradle.kts.tpl"),
    builtin!("project/gitignore.tpl"),
    builtin!("project/module-build.gradle.kts.tpl"),
    builtin!("project/package-info.java.tpl"),
    builtin!("project/root-build.gradle.kts.tpl"),
    builtin!("project/settings.gradle.kts.tpl"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn ids() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(id, _)| *id)
    }

    pub fn get(id: &str) -> Option<&'static str> {
        BUILTIN
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, text)| *text)
    }
}

impl TemplateSource for BuiltinTemplates {
    fn describe(&self) -> String {
        "built-in templates".to_string()
    }

    fn read(&self, id: &str) -> ArchforgeResult<Option<String>> {
        Ok(Self::get(id).map(str::to_string))
    }

    fn children(&self, prefix: &str) -> Vec<String> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        let mut names: Vec<String> = Self::ids()
            .filter_map(|id| id.strip_prefix(prefix.as_str()))
            // Only entries with something below them are directories.
            .filter_map(|rest| rest.split_once('/').map(|(dir, _)| dir.to_string()))
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ships_five_architectures() {
        assert_eq!(
            BuiltinTemplates.children("architectures"),
            [
                "hexagonal-multi",
                "hexagonal-multi-granular",
                "hexagonal-single",
                "onion-multi",
                "onion-single",
            ]
        );
    }

    #[test]
    fn adapters_are_listed_per_framework_and_paradigm() {
        assert_eq!(
            BuiltinTemplates.children("frameworks/spring/reactive/adapters/driven-adapters"),
            ["mongodb", "redis"]
        );
        assert_eq!(BuiltinTemplates.children("adapters/entry-points"), ["generic"]);
        assert!(BuiltinTemplates.children("frameworks/quarkus").is_empty());
    }
}
