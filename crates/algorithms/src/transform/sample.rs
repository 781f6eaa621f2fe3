use rand::seq::SliceRandom;
use rand::Rng;
use spatialkit_core::{Error, FeatureCollection, Result};

/// Random subset of `num` features, drawn without replacement
pub fn sample<R: Rng + ?Sized>(fc: &FeatureCollection, num: usize, rng: &mut R) -> Result<FeatureCollection> {
    if num > fc.len() {
        return Err(Error::invalid_parameter(
            "num",
            num,
            format!("cannot sample more than the {} available features", fc.len()),
        ));
    }
    Ok(fc.features.choose_multiple(rng, num).cloned().collect())
}
