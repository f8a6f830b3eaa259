use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Derive macro for the `rowbind::Record` field registry.
///
/// Generates an `impl rowbind::Record` on the annotated struct with:
///
/// - `fields()` — every declared field in declaration order, with its raw
///   `#[db("...")]` annotation (or `None` when the field has none).
/// - `set_field(index, &Value)` — decodes a row value into the field at `index`.
/// - `field_value(index)` — reads the field at `index` as a `Value`.
///
/// Only fields whose annotation is present and not `"-"` get setter/getter arms,
/// so ignored fields may have any type. Mapped fields must implement
/// `FromValue + ToValue + Default`. The struct itself must implement `Default`.
///
/// # Example
///
/// ```ignore
/// #[derive(Record, Default)]
/// pub struct User {
///     #[db("users.id")]
///     pub id: i64,
///
///     #[db("email")]
///     pub email: String,
///
///     #[db("-")]
///     pub cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(db))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record only supports structs",
            ))
        }
    };

    let mut def_tokens = Vec::new();
    let mut set_arms = Vec::new();
    let mut get_arms = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let field_name = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        let field_name_str = unraw(&field_name.to_string());

        let tag = parse_db_attr(field)?;

        let tag_expr = match &tag {
            Some(raw) => quote! { ::core::option::Option::Some(#raw) },
            None => quote! { ::core::option::Option::None },
        };
        def_tokens.push(quote! {
            ::rowbind::record::FieldDef {
                name: #field_name_str,
                tag: #tag_expr,
            }
        });

        // Mirrors the runtime ignore rule; ignored fields never get accessors.
        let mapped = matches!(tag.as_deref(), Some(raw) if !raw.is_empty() && raw != "-");
        if mapped {
            set_arms.push(quote! {
                #index => ::rowbind::convert::assign(&mut self.#field_name, value),
            });
            get_arms.push(quote! {
                #index => ::core::option::Option::Some(
                    ::rowbind::convert::ToValue::to_value(&self.#field_name),
                ),
            });
        }
    }

    let expanded = quote! {
        impl #impl_generics ::rowbind::record::Record for #name #ty_generics #where_clause {
            fn fields() -> &'static [::rowbind::record::FieldDef] {
                const FIELDS: &[::rowbind::record::FieldDef] = &[
                    #(#def_tokens),*
                ];
                FIELDS
            }

            #[allow(unused_variables)]
            fn set_field(&mut self, index: usize, value: &::rowbind::value::Value) {
                match index {
                    #(#set_arms)*
                    _ => {}
                }
            }

            fn field_value(&self, index: usize) -> ::core::option::Option<::rowbind::value::Value> {
                match index {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    Ok(TokenStream::from(expanded))
}

/// Read the raw annotation from `#[db("...")]`.
///
/// A field carries at most one `db` attribute.
fn parse_db_attr(field: &syn::Field) -> Result<Option<String>, syn::Error> {
    let mut tag: Option<String> = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("db") {
            continue;
        }
        if tag.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[db(...)] attribute"));
        }
        let value: LitStr = attr.parse_args()?;
        tag = Some(value.value());
    }
    Ok(tag)
}

/// Strip the `r#` prefix of raw identifiers (`r#type` → `type`).
fn unraw(ident: &str) -> String {
    ident.strip_prefix("r#").unwrap_or(ident).to_string()
}
