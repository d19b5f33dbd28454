//! Case search: parameter parsing, filter construction, SQL generation and paging.

pub mod escape;
pub mod filter;
pub mod pagination;
pub mod params;
pub mod query_builder;
pub mod text;

pub use filter::{
    AdvancedCriteria, CaseField, FilterAtom, FilterBuilder, FilterExpr, PartyField,
    SearchCriteria, SuggestField,
};
pub use pagination::{PageMeta, PageRequest, PageSizePolicy, Paged};
pub use params::{
    AdvancedSearchRequest, RawAdvancedParams, RawPageParams, RawSearchParams, SearchRequest,
};
pub use query_builder::{BindValue, CaseQuery};
