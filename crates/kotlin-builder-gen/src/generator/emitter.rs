//! Assembles the structural description of a generated builder from a resolved spec.

use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use regex::Regex;

use crate::generator::{
  ast::{
    ArgumentDef, BuildDef, BuilderArtifact, CHECK_REQUIRED_FIELDS_FUNCTION, COPY_SOURCE_PARAMETER,
    CopyInitializerDef, DefaultDef, Import, PropertyDef, RequiredFieldsCheckDef, ResolvedBuilder, SetterDef,
  },
  config::GenerationConfig,
  diagnostics::Diagnostics,
  naming,
  symbols::{ClassDecl, SymbolSnapshot, Visibility},
};

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\s*import\s+([A-Za-z_`][\w.`]*(?:\.\*)?)(?:\s+as\s+([A-Za-z_`][\w`]*))?\s*;?\s*$")
    .expect("valid import regex")
});

pub struct BuilderEmitter<'a> {
  snapshot: &'a SymbolSnapshot,
  config: &'a GenerationConfig,
}

impl<'a> BuilderEmitter<'a> {
  pub fn new(snapshot: &'a SymbolSnapshot, config: &'a GenerationConfig) -> Self {
    Self { snapshot, config }
  }

  /// Produces the artifact for one builder.
  ///
  /// `source` is the text of the file declaring the target; it is only consulted for imports, and only when
  /// the target has defaulted parameters.
  pub fn emit(
    &self,
    builder: &ResolvedBuilder<'_>,
    source: Option<&str>,
    diagnostics: &mut Diagnostics,
  ) -> BuilderArtifact {
    let spec = &builder.spec;
    let package = spec.package();

    let mut properties = Vec::with_capacity(builder.params.len());
    let mut setters = Vec::with_capacity(builder.params.len());
    for param in &builder.params {
      diagnostics.debug(format!("Adding {} to {}", param.name, spec.builder_name));
      properties.push(PropertyDef {
        name: param.name.clone(),
        type_name: param.type_name.clone().as_nullable(),
      });
      setters.push(SetterDef {
        name: naming::setter_name(&spec.setter_prefix, &param.name),
        property: param.name.clone(),
        parameter_type: param.type_name.clone(),
      });
    }

    let visible = self.visible_properties(spec.class);
    let copy_initializer = CopyInitializerDef {
      parameter: COPY_SOURCE_PARAMETER.to_string(),
      copied: builder
        .params
        .iter()
        .filter(|param| visible.contains(param.name.as_str()))
        .map(|param| param.name.clone())
        .collect(),
    };

    let build_function = BuildDef {
      target_reference: naming::target_reference(&spec.target, package),
      defaults: builder
        .params
        .iter()
        .filter_map(|param| {
          param.default_expression().map(|expression| DefaultDef {
            property: param.name.clone(),
            expression: expression.to_string(),
          })
        })
        .collect(),
      arguments: builder
        .params
        .iter()
        .map(|param| {
          let defaulted = param.default_expression().is_some();
          ArgumentDef {
            name: param.name.clone(),
            non_null: !param.nullable && !defaulted,
            defaulted,
          }
        })
        .collect(),
    };

    let required_check = RequiredFieldsCheckDef {
      function_name: CHECK_REQUIRED_FIELDS_FUNCTION.to_string(),
      fields: builder
        .params
        .iter()
        .filter(|param| param.is_required())
        .map(|param| param.name.clone())
        .collect(),
    };

    let imports = if builder.has_defaults() {
      let mut imports = source.map(|text| self.file_imports(text)).unwrap_or_default();
      imports.extend(Self::companion_imports(builder));
      imports
    } else {
      Vec::new()
    };

    BuilderArtifact::builder()
      .name(spec.builder_name.clone())
      .package(package.to_string())
      .target(spec.target.clone())
      .imports(imports)
      .properties(properties)
      .setters(setters)
      .copy_initializer(copy_initializer)
      .build_function(build_function)
      .required_check(required_check)
      .maybe_originating_file(spec.class.source.clone())
      .build()
  }

  /// Names of the non-private properties of `class` and of its superclasses known to the snapshot.
  pub fn visible_properties(&self, class: &ClassDecl) -> BTreeSet<String> {
    let mut visible = BTreeSet::new();
    let mut seen = HashSet::new();
    let mut current = Some(class);

    while let Some(class) = current {
      if !seen.insert(class.qualified_name.as_str()) {
        break;
      }
      visible.extend(
        class
          .properties
          .iter()
          .filter(|property| property.visibility != Visibility::Private)
          .map(|property| property.name.clone()),
      );
      current = class
        .superclass
        .as_deref()
        .and_then(|superclass| self.snapshot.class(superclass));
    }

    visible
  }

  /// The import directives of `source`, minus the builder annotation itself.
  fn file_imports(&self, source: &str) -> Vec<Import> {
    source
      .lines()
      .filter_map(|line| IMPORT_LINE.captures(line))
      .filter(|captures| captures[1] != self.config.annotation)
      .map(|captures| {
        let import = Import::new(&captures[1]);
        match captures.get(2) {
          Some(alias) => import.with_alias(alias.as_str()),
          None => import,
        }
      })
      .collect()
  }

  /// Non-private companion functions, so default expressions can call them unqualified.
  fn companion_imports(builder: &ResolvedBuilder<'_>) -> Vec<Import> {
    let Some(companion) = &builder.spec.class.companion else {
      return Vec::new();
    };
    let companion_path = format!("{}.{}", builder.spec.qualified_name(), companion.name);
    companion
      .functions
      .iter()
      .filter(|function| function.visibility != Visibility::Private && !function.returns_companion)
      .map(|function| Import::new(format!("{companion_path}.{}", function.name)))
      .collect()
  }
}
