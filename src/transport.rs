//! Response container handed back by an RPC transport.
//!
//! Holds the marshaled NDR payload and the resource handles that came with
//! it. The container owns duplicates of those handles, so their lifetime is
//! independent of whatever the transport duplicated them from.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

/// Transfer syntax the payload was marshaled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRepresentation {
    Ndr20,
    Ndr64,
}

/// Transport-specific marshaling support attached to a response.
pub trait TransportMarshal: fmt::Debug + Send + Sync {
    fn transport_name(&self) -> &str;
}

#[derive(Debug)]
pub struct RpcResponse<H> {
    ndr_buffer: Bytes,
    handles: Vec<H>,
    data_representation: DataRepresentation,
    marshal: Option<Arc<dyn TransportMarshal>>,
}

impl<H> RpcResponse<H> {
    pub fn new(
        ndr_buffer: impl Into<Bytes>,
        handles: Vec<H>,
        data_representation: DataRepresentation,
        marshal: Option<Arc<dyn TransportMarshal>>,
    ) -> Self {
        Self {
            ndr_buffer: ndr_buffer.into(),
            handles,
            data_representation,
            marshal,
        }
    }

    /// Builds a response owning a duplicate of every source handle.
    ///
    /// Stops at the first failed duplication; duplicates made before it are
    /// dropped with the partial list.
    pub fn from_duplicates<S, E, F>(
        ndr_buffer: impl Into<Bytes>,
        sources: &[S],
        mut duplicate: F,
        data_representation: DataRepresentation,
        marshal: Option<Arc<dyn TransportMarshal>>,
    ) -> Result<Self, E>
    where
        F: FnMut(&S) -> Result<H, E>,
    {
        let handles = sources.iter().map(&mut duplicate).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(ndr_buffer, handles, data_representation, marshal))
    }

    pub fn ndr_buffer(&self) -> &Bytes {
        &self.ndr_buffer
    }

    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    pub fn data_representation(&self) -> DataRepresentation {
        self.data_representation
    }

    pub fn marshal(&self) -> Option<&Arc<dyn TransportMarshal>> {
        self.marshal.as_ref()
    }

    pub fn into_parts(self) -> (Bytes, Vec<H>) {
        (self.ndr_buffer, self.handles)
    }
}
