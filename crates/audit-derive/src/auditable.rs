use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, parse_quote, Data, DeriveInput, Error, Fields, GenericParam, Path};

use crate::attr::{ContainerAttrs, FieldAttrs};
use crate::util::where_clause_with_bounds;

// derive_auditable
pub fn derive_auditable(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let container = ContainerAttrs::parse(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(Error::new_spanned(
                    other,
                    "Auditable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                ident,
                "Auditable can only be derived for structs with named fields",
            ))
        }
    };

    let type_name = container
        .rename
        .clone()
        .unwrap_or_else(|| ident.unraw().to_string());

    let krate: Path = container
        .krate
        .clone()
        .unwrap_or_else(|| parse_quote!(::audit_types));

    let mut schema_entries = Vec::with_capacity(fields.len());
    let mut accessor_arms = Vec::with_capacity(fields.len());
    let mut bounds = Vec::new();
    let has_type_params = input.generics.type_params().next().is_some();

    for (index, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        let field_ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
        let ty = &field.ty;

        let name = match (&attrs.rename, container.rename_all) {
            (Some(rename), _) => rename.clone(),
            (None, Some(rule)) => rule.apply(&field_ident.unraw().to_string()),
            (None, None) => field_ident.unraw().to_string(),
        };

        schema_entries.push(if attrs.key {
            quote!(#krate::FieldSchema::key(#name))
        } else {
            quote!(#krate::FieldSchema::new(#name))
        });

        accessor_arms.push(quote! {
            #index => ::core::option::Option::Some(
                #krate::AuditValue::audit_value(&self.#field_ident)
            ),
        });

        if has_type_params {
            bounds.push(quote!(#ty: #krate::AuditValue));
        }
    }

    for param in &input.generics.params {
        if let GenericParam::Type(ty) = param {
            let param_ident = &ty.ident;
            bounds.push(quote!(#param_ident: 'static));
        }
    }

    let where_tokens = where_clause_with_bounds(where_clause, &bounds);
    let field_count = fields.len();

    Ok(quote! {
        impl #impl_generics #krate::Auditable for #ident #ty_generics #where_tokens {
            fn type_schema() -> &'static #krate::TypeSchema {
                static FIELDS: [#krate::FieldSchema; #field_count] = [#(#schema_entries),*];
                static SCHEMA: #krate::TypeSchema =
                    #krate::TypeSchema::new(#type_name, &FIELDS);
                &SCHEMA
            }

            fn schema(&self) -> &'static #krate::TypeSchema {
                <Self as #krate::Auditable>::type_schema()
            }

            fn field(&self, index: usize) -> ::core::option::Option<#krate::FieldValue<'_>> {
                match index {
                    #(#accessor_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }

        impl #impl_generics #krate::AuditValue for #ident #ty_generics #where_tokens {
            fn audit_value(&self) -> #krate::FieldValue<'_> {
                #krate::FieldValue::Composite(self)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn expand_str(input: TokenStream) -> String {
        derive_auditable(input).to_string()
    }

    #[test]
    fn emits_field_table_in_declaration_order() {
        let out = expand_str(quote! {
            struct Account {
                id: u32,
                account_name: String,
            }
        });
        let id = out.find("FieldSchema :: new (\"id\")").unwrap();
        let name = out.find("FieldSchema :: new (\"account_name\")").unwrap();
        assert!(id < name);
        assert!(out.contains("\"Account\""));
    }

    #[test]
    fn applies_rename_rules_and_key_marker() {
        let out = expand_str(quote! {
            #[audit(rename_all = "camelCase")]
            struct Subject {
                #[audit(key)]
                subject_id: u32,
                #[audit(rename = "title")]
                subject_name: String,
            }
        });
        assert!(out.contains("FieldSchema :: key (\"subjectId\")"));
        assert!(out.contains("FieldSchema :: new (\"title\")"));
    }

    #[test]
    fn rejects_tuple_structs() {
        let out = expand_str(quote! {
            struct Pair(u32, u32);
        });
        assert!(out.contains("compile_error"));
    }

    #[test]
    fn rejects_enums() {
        let out = expand_str(quote! {
            enum Kind { A, B }
        });
        assert!(out.contains("compile_error"));
    }

    #[test]
    fn crate_override_replaces_default_paths() {
        let out = expand_str(quote! {
            #[audit(crate = "audit_diff::audit_types")]
            struct Tag {
                id: u32,
            }
        });
        assert!(out.contains("audit_diff :: audit_types :: Auditable for Tag"));
        assert!(out.contains("audit_diff :: audit_types :: FieldSchema :: new (\"id\")"));
        assert!(!out.contains("impl :: audit_types"));
    }

    #[test]
    fn generic_params_get_static_bound() {
        let out = expand_str(quote! {
            struct Wrapper<T> {
                inner: T,
            }
        });
        assert!(out.contains("T : 'static"));
        assert!(out.contains("T : :: audit_types :: AuditValue"));
    }
}
