use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

/// An element of a parsed SOAP response, with namespace prefixes stripped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
    pub text: String,
}

impl XmlNode {
    fn from_start(start: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).to_string();
        let attributes = start
            .attributes()
            .flatten()
            .map(|attr| {
                let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
                let value = String::from_utf8_lossy(&attr.value).to_string();
                (key, value)
            })
            .collect();

        XmlNode {
            name,
            attributes,
            ..Default::default()
        }
    }

    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// True for `xsi:nil="true"` elements.
    pub fn is_nil(&self) -> bool {
        self.attribute("nil") == Some("true")
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(XmlNode::from_start(&e)),
                Event::Empty(e) => {
                    let node = XmlNode::from_start(&e);
                    attach(&mut stack, &mut root, node);
                }
                Event::End(_) => {
                    let node = stack.pop().ok_or_else(|| Error::Transport {
                        code: "XML".to_string(),
                        message: "unbalanced closing tag".to_string(),
                    })?;
                    attach(&mut stack, &mut root, node);
                }
                Event::Text(e) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::Transport {
                code: "XML".to_string(),
                message: "document ended inside an element".to_string(),
            });
        }

        root.ok_or_else(|| Error::Transport {
            code: "XML".to_string(),
            message: "empty document".to_string(),
        })
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

/// Returns the first element inside the SOAP Body, or the fault it carries.
pub fn parse_body(xml: &str) -> Result<XmlNode> {
    let envelope = XmlNode::parse(xml)?;
    if envelope.name != "Envelope" {
        return Err(Error::UnexpectedResponse("SOAP Envelope".to_string()));
    }

    let body = envelope
        .child("Body")
        .ok_or_else(|| Error::UnexpectedResponse("SOAP Body".to_string()))?;
    let content = body
        .children
        .first()
        .ok_or_else(|| Error::UnexpectedResponse("SOAP Body content".to_string()))?;

    if content.name == "Fault" {
        return Err(fault_error(content));
    }

    Ok(content.clone())
}

fn fault_error(fault: &XmlNode) -> Error {
    // SOAP 1.1 uses faultcode/faultstring, SOAP 1.2 nests Code/Value and Reason/Text
    let code = fault
        .child("faultcode")
        .or_else(|| fault.child("Code").and_then(|c| c.child("Value")))
        .map(|n| n.text.clone())
        .unwrap_or_default();
    let message = fault
        .child("faultstring")
        .or_else(|| fault.child("Reason").and_then(|r| r.child("Text")))
        .map(|n| n.text.clone())
        .unwrap_or_default();

    Error::Transport { code, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_content() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
  <S:Body>
    <ns2:AuthenticateResponse xmlns:ns2="http://gsxws.apple.com/elements/global">
      <AuthenticateResponse>
        <userSessionId>Sdt7tXp2XytTEVwHBeDx6lHTXI3w9s+M</userSessionId>
      </AuthenticateResponse>
    </ns2:AuthenticateResponse>
  </S:Body>
</S:Envelope>"#;

        let content = parse_body(xml).unwrap();
        assert_eq!(content.name, "AuthenticateResponse");
        let inner = content.child("AuthenticateResponse").unwrap();
        assert_eq!(
            inner.child("userSessionId").unwrap().text,
            "Sdt7tXp2XytTEVwHBeDx6lHTXI3w9s+M"
        );
    }

    #[test]
    fn test_fault_preserved_verbatim() {
        let xml = r#"<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
  <S:Body>
    <S:Fault>
      <faultcode>ATH.LOG.020</faultcode>
      <faultstring>Invalid Session ID: &amp; expired</faultstring>
    </S:Fault>
  </S:Body>
</S:Envelope>"#;

        match parse_body(xml) {
            Err(Error::Transport { code, message }) => {
                assert_eq!(code, "ATH.LOG.020");
                assert_eq!(message, "Invalid Session ID: & expired");
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_soap12_fault() {
        let xml = r#"<env:Envelope xmlns:env="http://www.w3.org/2003/05/soap-envelope">
  <env:Body>
    <env:Fault>
      <env:Code><env:Value>env:Sender</env:Value></env:Code>
      <env:Reason><env:Text xml:lang="en">Serial number is not valid.</env:Text></env:Reason>
    </env:Fault>
  </env:Body>
</env:Envelope>"#;

        match parse_body(xml) {
            Err(Error::Transport { code, message }) => {
                assert_eq!(code, "env:Sender");
                assert_eq!(message, "Serial number is not valid.");
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_nil_and_empty_elements() {
        let node = XmlNode::parse(
            r#"<root xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                 <a xsi:nil="true"/><b/>
               </root>"#,
        )
        .unwrap();
        assert!(node.child("a").unwrap().is_nil());
        assert!(!node.child("b").unwrap().is_nil());
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            XmlNode::parse("<a><b></a>"),
            Err(Error::Transport { code, .. }) if code == "XML"
        ));
        assert!(matches!(
            parse_body("<html><body>502</body></html>"),
            Err(Error::UnexpectedResponse(_))
        ));
    }
}
