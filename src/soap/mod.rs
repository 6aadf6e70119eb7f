pub mod envelope;
pub mod response;
pub mod transport;

pub use envelope::RequestEnvelope;
pub use response::XmlNode;
pub use transport::SoapTransport;
