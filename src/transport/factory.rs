use tracing::{debug, info, instrument};

use crate::transport::{CurlTransport, Transport, TransportSpec};

#[instrument(fields(program = %spec.program))]
pub fn build(spec: &TransportSpec) -> Box<dyn Transport> {
    debug!("transport_factory_build start");
    let t = CurlTransport::new(&spec.program, spec.extra_args.clone());
    info!(extra_args = spec.extra_args.len(), "transport_factory_build ok");
    Box::new(t)
}
