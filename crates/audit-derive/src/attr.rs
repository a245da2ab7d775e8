use convert_case::{Case, Casing};
use syn::{Attribute, LitStr, Path, Result};

///
/// ContainerAttrs
///

#[derive(Default)]
pub struct ContainerAttrs {
    pub krate: Option<Path>,
    pub rename: Option<String>,
    pub rename_all: Option<RenameRule>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("audit")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.krate = Some(lit.parse()?);
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("rename_all") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let rule = RenameRule::from_name(&lit.value()).ok_or_else(|| {
                        meta.error(format!("unknown rename rule `{}`", lit.value()))
                    })?;
                    out.rename_all = Some(rule);
                    Ok(())
                } else {
                    Err(meta.error("expected `crate`, `rename` or `rename_all`"))
                }
            })?;
        }

        Ok(out)
    }
}

///
/// FieldAttrs
///

#[derive(Default)]
pub struct FieldAttrs {
    pub key: bool,
    pub rename: Option<String>,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("audit")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    out.key = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported field attribute, expected `key` or `rename`"))
                }
            })?;
        }

        Ok(out)
    }
}

///
/// RenameRule
///

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameRule {
    Camel,
    Pascal,
    Snake,
    Kebab,
}

impl RenameRule {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "camelCase" => Some(Self::Camel),
            "PascalCase" => Some(Self::Pascal),
            "snake_case" => Some(Self::Snake),
            "kebab-case" => Some(Self::Kebab),
            _ => None,
        }
    }

    pub fn apply(self, ident: &str) -> String {
        let case = match self {
            Self::Camel => Case::Camel,
            Self::Pascal => Case::Pascal,
            Self::Snake => Case::Snake,
            Self::Kebab => Case::Kebab,
        };
        ident.to_case(case)
    }
}
