//! Basic lane validation before anything is fetched

use lanegate_core::{Lane, ProtocolError};

use crate::provider::ChainRegistry;

/// Check that both ends of a lane are configured and distinct.
///
/// Does not check that the bridge actually serves the lane; that needs the
/// router (see `EvmLaneProvider::is_token_supported`).
pub fn validate_lane(registry: &ChainRegistry, lane: &Lane) -> Result<(), ProtocolError> {
    registry.get(&lane.source)?;
    registry.get(&lane.destination)?;

    if lane.source == lane.destination {
        return Err(ProtocolError::LaneNotSupported {
            source_chain: lane.source.clone(),
            destination_chain: lane.destination.clone(),
            token: lane.token.to_string(),
        });
    }

    if lane.token.is_zero() {
        return Err(ProtocolError::InvalidAddress {
            address: lane.token.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanegate_core::{AppConfig, EvmAddress};

    fn registry() -> ChainRegistry {
        ChainRegistry::new(AppConfig::default().chains)
    }

    fn token() -> EvmAddress {
        EvmAddress::from_bytes([0xab; 20])
    }

    #[test]
    fn test_valid_lane() {
        let lane = Lane::new("ethereum-sepolia", "avalanche-fuji", token());
        assert!(validate_lane(&registry(), &lane).is_ok());
    }

    #[test]
    fn test_unknown_chain() {
        let lane = Lane::new("ethereum-sepolia", "base-sepolia", token());
        let err = validate_lane(&registry(), &lane).unwrap_err();
        assert_eq!(err.error_code(), "chain_not_configured");
    }

    #[test]
    fn test_same_chain_rejected() {
        let lane = Lane::new("avalanche-fuji", "avalanche-fuji", token());
        assert!(matches!(
            validate_lane(&registry(), &lane),
            Err(ProtocolError::LaneNotSupported { .. })
        ));
    }

    #[test]
    fn test_zero_token_rejected() {
        let lane = Lane::new("ethereum-sepolia", "avalanche-fuji", EvmAddress::ZERO);
        assert!(matches!(
            validate_lane(&registry(), &lane),
            Err(ProtocolError::InvalidAddress { .. })
        ));
    }
}
