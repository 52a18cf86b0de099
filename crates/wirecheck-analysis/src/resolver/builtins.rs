//! Built-in module catalogue.
//!
//! Default imports are registered in every resolver so ordinary code does not
//! register hundreds of unknown symbols. Library modules (the test framework,
//! `Expect`, `Fuzz`) are known by name but only registered when a file
//! imports them with `exposing (..)`.

use wirecheck_core::config::AnalysisConfig;

/// Which of a catalogued module's members are visible unqualified when it is
/// imported by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultExposure {
    /// Everything, as with `import Basics exposing (..)`.
    All,
    /// Only these types (with all constructors) and values.
    Only(Vec<String>),
}

/// Values, types and constructors of one known module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueModule {
    pub name: String,
    pub alias: Option<String>,
    /// `Some` for modules every file imports implicitly.
    pub default_exposure: Option<DefaultExposure>,
    pub values: Vec<String>,
    /// `(type name, constructors)`.
    pub types: Vec<(String, Vec<String>)>,
}

impl CatalogueModule {
    fn new(name: &str, values: &[&str], types: &[(&str, &[&str])]) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
            default_exposure: None,
            values: values.iter().map(|v| v.to_string()).collect(),
            types: types
                .iter()
                .map(|(t, ctors)| (t.to_string(), ctors.iter().map(|c| c.to_string()).collect()))
                .collect(),
        }
    }

    fn aliased(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    fn imported_exposing_all(mut self) -> Self {
        self.default_exposure = Some(DefaultExposure::All);
        self
    }

    fn imported_exposing(mut self, names: &[&str]) -> Self {
        self.default_exposure = Some(DefaultExposure::Only(
            names.iter().map(|n| n.to_string()).collect(),
        ));
        self
    }

    fn imported(self) -> Self {
        self.imported_exposing(&[])
    }

    pub fn is_default_import(&self) -> bool {
        self.default_exposure.is_some()
    }
}

const BASICS_VALUES: &[&str] = &[
    "+", "-", "*", "/", "//", "^", "==", "/=", "<", ">", "<=", ">=", "&&", "||",
    "++", "<|", "|>", "<<", ">>", "toFloat", "round", "floor", "ceiling",
    "truncate", "max", "min", "compare", "not", "xor", "modBy", "remainderBy",
    "negate", "abs", "clamp", "sqrt", "logBase", "e", "pi", "cos", "sin", "tan",
    "acos", "asin", "atan", "atan2", "degrees", "radians", "turns", "toPolar",
    "fromPolar", "isNaN", "isInfinite", "identity", "always", "never",
];

const BASICS_TYPES: &[(&str, &[&str])] = &[
    ("Int", &[]),
    ("Float", &[]),
    ("Bool", &["True", "False"]),
    ("Order", &["LT", "EQ", "GT"]),
    ("Never", &[]),
];

const LIST_VALUES: &[&str] = &[
    "::", "singleton", "repeat", "range", "map", "indexedMap", "foldl", "foldr",
    "filter", "filterMap", "length", "reverse", "member", "all", "any",
    "maximum", "minimum", "sum", "product", "append", "concat", "concatMap",
    "intersperse", "map2", "map3", "sort", "sortBy", "sortWith", "isEmpty",
    "head", "tail", "take", "drop", "partition", "unzip",
];

const MAYBE_VALUES: &[&str] = &["withDefault", "map", "map2", "map3", "andThen"];

const RESULT_VALUES: &[&str] = &[
    "withDefault", "map", "map2", "map3", "andThen", "mapError", "toMaybe", "fromMaybe",
];

const STRING_VALUES: &[&str] = &[
    "isEmpty", "length", "reverse", "repeat", "replace", "append", "concat",
    "split", "join", "words", "lines", "slice", "left", "right", "dropLeft",
    "dropRight", "contains", "startsWith", "endsWith", "indexes", "toInt",
    "fromInt", "toFloat", "fromFloat", "toList", "fromList", "fromChar", "cons",
    "uncons", "toUpper", "toLower", "pad", "padLeft", "padRight", "trim",
    "trimLeft", "trimRight", "map", "filter", "foldl", "foldr", "any", "all",
];

const CHAR_VALUES: &[&str] = &[
    "isUpper", "isLower", "isAlpha", "isDigit", "isAlphaNum", "toUpper",
    "toLower", "toCode", "fromCode",
];

const TUPLE_VALUES: &[&str] = &["pair", "first", "second", "mapFirst", "mapSecond", "mapBoth"];

const DEBUG_VALUES: &[&str] = &["toString", "log", "todo"];

const CMD_SUB_VALUES: &[&str] = &["none", "batch", "map"];

const EXPECT_VALUES: &[&str] = &[
    "equal", "notEqual", "all", "lessThan", "atMost", "greaterThan", "atLeast",
    "within", "notWithin", "ok", "err", "equalLists", "equalDicts", "equalSets",
    "pass", "fail", "onFail", "true", "false",
];

const FUZZ_VALUES: &[&str] = &[
    "int", "intRange", "float", "floatRange", "percentage", "string", "bool",
    "char", "unit", "order", "list", "array", "maybe", "result", "pair",
    "triple", "constant", "oneOf", "frequency", "map", "map2", "andThen",
];

/// Every built-in module a resolver may seed itself with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCatalogue {
    modules: Vec<CatalogueModule>,
}

impl ModuleCatalogue {
    /// Standard library default imports plus the test-framework libraries.
    ///
    /// `test_module` names the framework's module; its values are the suite and
    /// test function names the analyzer recognizes.
    pub fn standard(test_module: &str, suite_functions: &[String], test_functions: &[String]) -> Self {
        let mut framework_values: Vec<&str> = suite_functions
            .iter()
            .chain(test_functions)
            .map(String::as_str)
            .collect();
        framework_values.extend(["skip", "only"]);

        let modules = vec![
            CatalogueModule::new("Basics", BASICS_VALUES, BASICS_TYPES).imported_exposing_all(),
            CatalogueModule::new("List", LIST_VALUES, &[("List", &[])])
                .imported_exposing(&["List", "::"]),
            CatalogueModule::new("Maybe", MAYBE_VALUES, &[("Maybe", &["Just", "Nothing"])])
                .imported_exposing(&["Maybe"]),
            CatalogueModule::new("Result", RESULT_VALUES, &[("Result", &["Ok", "Err"])])
                .imported_exposing(&["Result"]),
            CatalogueModule::new("String", STRING_VALUES, &[("String", &[])])
                .imported_exposing(&["String"]),
            CatalogueModule::new("Char", CHAR_VALUES, &[("Char", &[])])
                .imported_exposing(&["Char"]),
            CatalogueModule::new("Tuple", TUPLE_VALUES, &[]).imported(),
            CatalogueModule::new("Debug", DEBUG_VALUES, &[]).imported(),
            CatalogueModule::new(
                "Platform",
                &["worker"],
                &[("Program", &[]), ("Task", &[]), ("ProcessId", &[])],
            )
            .imported_exposing(&["Program"]),
            CatalogueModule::new("Platform.Cmd", CMD_SUB_VALUES, &[("Cmd", &[])])
                .aliased("Cmd")
                .imported_exposing(&["Cmd"]),
            CatalogueModule::new("Platform.Sub", CMD_SUB_VALUES, &[("Sub", &[])])
                .aliased("Sub")
                .imported_exposing(&["Sub"]),
            CatalogueModule::new(test_module, &framework_values, &[("Test", &[])]),
            CatalogueModule::new("Expect", EXPECT_VALUES, &[("Expectation", &[])]),
            CatalogueModule::new("Fuzz", FUZZ_VALUES, &[("Fuzzer", &[])]),
        ];
        Self { modules }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::standard(
            config.effective_test_module(),
            &config.effective_suite_functions(),
            &config.effective_test_functions(),
        )
    }

    pub fn modules(&self) -> &[CatalogueModule] {
        &self.modules
    }

    pub fn default_imports(&self) -> impl Iterator<Item = &CatalogueModule> {
        self.modules.iter().filter(|m| m.is_default_import())
    }

    pub fn get(&self, name: &str) -> Option<&CatalogueModule> {
        self.modules.iter().find(|m| m.name == name)
    }
}

impl Default for ModuleCatalogue {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_imports_exclude_libraries() {
        let catalogue = ModuleCatalogue::default();
        let names: Vec<_> = catalogue.default_imports().map(|m| m.name.as_str()).collect();
        assert!(names.contains(&"Basics"));
        assert!(names.contains(&"Platform.Sub"));
        assert!(!names.contains(&"Test"));
        assert!(!names.contains(&"Expect"));
    }

    #[test]
    fn framework_module_carries_configured_names() {
        let catalogue = ModuleCatalogue::standard(
            "Spec",
            &["suite".to_string()],
            &["check".to_string()],
        );
        let spec = catalogue.get("Spec").unwrap();
        assert!(spec.values.contains(&"suite".to_string()));
        assert!(spec.values.contains(&"check".to_string()));
        assert!(catalogue.get("Test").is_none());
    }
}
