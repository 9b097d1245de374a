//! OpenAPI Scout: discovery, retrieval and summarization of OpenAPI/Swagger documents.

pub mod auth;
pub mod config;
pub mod endpoint;
pub mod engine;
pub mod error;
pub mod events;
pub mod fetch;
pub mod present;
pub mod probe;
pub mod sniff;
pub mod spec;
pub mod summary;

pub use auth::{build_auth_headers, AuthDescriptor, HeaderMap};
pub use config::ScoutSettings;
pub use endpoint::{EndpointResolver, VendorApi, VendorHosts};
pub use engine::{
    digest_content, FetchSpecArgs, ParseSpecArgs, Retrieval, SearchPathsArgs, SpecScout,
    VendorSpecArgs,
};
pub use error::{ScoutError, ScoutResult};
pub use events::{EventSink, NullSink, RecordingSink, ScoutEvent, TracingSink};
pub use fetch::{
    CredentialsMode, FetchOutcome, FetchRequest, Fetcher, ReqwestTransport, SpecFormat, Transport,
};
pub use probe::{PathProbe, ProbeResult, PROBE_CATALOG};
pub use sniff::{classify, Sniffed};
pub use spec::ParsedSpec;
pub use summary::{summarize, Digest};
