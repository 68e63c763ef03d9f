//! Implementation of the `#[derive(Bind)]` macro.

use std::collections::HashSet;

use proc_macro2::{TokenStream, TokenTree};
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Generics, Ident, LitStr, Type, parse_quote};

/// Parse and generate code for the `#[derive(Bind)]` macro.
pub fn derive_bind_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let name_str = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Bind derive requires a struct with named fields",
                ));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Bind derive does not support tuple structs",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Bind derive only supports structs",
            ));
        }
    };

    let bound_fields: Vec<BoundField> = fields
        .iter()
        .map(parse_field)
        .filter_map(Result::transpose)
        .collect::<Result<_, _>>()?;

    let visits = bound_fields.iter().map(|field| {
        let ident = &field.name;
        let key = &field.key;
        quote! {
            visitor(#key, ::dsnkit::Field::slot(&mut self.#ident))?;
        }
    });

    let generics = add_field_bounds(&input.generics, &bound_fields);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::dsnkit::Record for #name #ty_generics #where_clause {
            fn record_name(&self) -> &'static str {
                #name_str
            }

            fn visit_fields(
                &mut self,
                visitor: &mut ::dsnkit::Visitor<'_>,
            ) -> ::core::result::Result<(), ::dsnkit::BindError> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::dsnkit::Field for #name #ty_generics #where_clause {
            fn slot(&mut self) -> ::dsnkit::Slot<'_> {
                ::dsnkit::Slot::Group(self)
            }
        }
    })
}

/// A field carrying a `#[dsn("...")]` attribute.
#[derive(Debug)]
struct BoundField {
    name: Ident,
    ty: Type,
    key: String,
}

/// Require `Field` for every bound field type that mentions a type parameter.
fn add_field_bounds(generics: &Generics, fields: &[BoundField]) -> Generics {
    let params: HashSet<Ident> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();

    let mut generics = generics.clone();
    if params.is_empty() {
        return generics;
    }

    let where_clause = generics.make_where_clause();
    for field in fields {
        if mentions_any(field.ty.to_token_stream(), &params) {
            let ty = &field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::dsnkit::Field));
        }
    }
    generics
}

fn mentions_any(tokens: TokenStream, params: &HashSet<Ident>) -> bool {
    tokens.into_iter().any(|token| match token {
        TokenTree::Ident(ident) => params.contains(&ident),
        TokenTree::Group(group) => mentions_any(group.stream(), params),
        _ => false,
    })
}

/// Parse the `#[dsn("...")]` attribute of a field, if any.
fn parse_field(field: &syn::Field) -> Result<Option<BoundField>, syn::Error> {
    let mut key: Option<String> = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("dsn") {
            continue;
        }

        if key.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate #[dsn(...)] attribute",
            ));
        }

        let value: LitStr = attr.parse_args().map_err(|err| {
            syn::Error::new(err.span(), "expected a binding key, e.g. #[dsn(\"host\")]")
        })?;
        key = Some(value.value());
    }

    let Some(key) = key else {
        return Ok(None);
    };

    let name = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Fields must be named"))?;

    Ok(Some(BoundField {
        name,
        ty: field.ty.clone(),
        key,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_simple_struct() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[dsn("scheme")]
                scheme: String,
                #[dsn("query.limit")]
                limit: i32,
                untouched: bool,
            }
        };

        let code = derive_bind_impl(&input).unwrap().to_string();
        assert!(code.contains("Record for Config"));
        assert!(code.contains("Field for Config"));
        assert!(code.contains("\"scheme\""));
        assert!(code.contains("\"query.limit\""));
        assert!(code.contains("self . limit"));
        assert!(!code.contains("untouched"));
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[dsn("port")]
                port: u16,
                #[dsn("host")]
                host: String,
            }
        };

        let code = derive_bind_impl(&input).unwrap().to_string();
        let port = code.find("\"port\"").unwrap();
        let host = code.find("\"host\"").unwrap();
        assert!(port < host);
    }

    #[test]
    fn test_generic_field_types_get_field_bound() {
        let input: DeriveInput = parse_quote! {
            struct Config<T: Default> where T: Clone {
                #[dsn("query")]
                options: T,
                #[dsn("query.tag")]
                tags: Box<T>,
                #[dsn("host")]
                host: String,
                unbound: T,
            }
        };

        let generics = add_field_bounds(&input.generics, &bound_fields(&input));
        let predicates: Vec<String> = generics
            .where_clause
            .unwrap()
            .predicates
            .iter()
            .map(|p| p.to_token_stream().to_string())
            .collect();

        assert_eq!(
            predicates,
            vec![
                "T : Clone".to_string(),
                "T : :: dsnkit :: Field".to_string(),
                "Box < T > : :: dsnkit :: Field".to_string(),
            ]
        );
    }

    #[test]
    fn test_non_generic_struct_gets_no_where_clause() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[dsn("host")]
                host: String,
            }
        };

        let generics = add_field_bounds(&input.generics, &bound_fields(&input));
        assert!(generics.where_clause.is_none());
    }

    fn bound_fields(input: &DeriveInput) -> Vec<BoundField> {
        let Data::Struct(data) = &input.data else {
            panic!("expected a struct");
        };
        data.fields
            .iter()
            .filter_map(|field| parse_field(field).unwrap())
            .collect()
    }

    #[test]
    fn test_tuple_struct_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Config(String);
        };
        assert!(derive_bind_impl(&input).is_err());
    }

    #[test]
    fn test_enum_rejected() {
        let input: DeriveInput = parse_quote! {
            enum Scheme { Tcp, Unix }
        };
        assert!(derive_bind_impl(&input).is_err());
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[dsn("host")]
                #[dsn("address")]
                host: String,
            }
        };
        let err = derive_bind_impl(&input).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_non_string_key_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[dsn(host)]
                host: String,
            }
        };
        let err = derive_bind_impl(&input).unwrap_err();
        assert!(err.to_string().contains("binding key"));
    }
}
