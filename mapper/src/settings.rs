use crate::{target::Target, values::to_prefixed_list, ATTRIBUTE_PREFIX, CLAIM, USER_ATTRIBUTE};
use identity_broker::{
    claims::{claim_value, ClaimPath},
    context::BrokeredIdentityContext,
    model::MapperModel,
};

/// The typed form of a mapper's flat configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapperSettings {
    pub claim: ClaimPath,
    pub target: Target,
    pub prefix: String,
}

impl MapperSettings {
    /// Read the settings of a mapper, `None` if it has no target configured.
    pub fn from_model(model: &MapperModel) -> Option<Self> {
        let target = Target::parse(model.config_value(USER_ATTRIBUTE).unwrap_or_default())?;

        Some(Self {
            claim: ClaimPath::parse(model.config_value(CLAIM).unwrap_or_default()),
            target,
            prefix: model.config_value(ATTRIBUTE_PREFIX).unwrap_or_default().to_string(),
        })
    }

    /// Resolve the claim and derive the prefixed values from it.
    pub fn prefixed_values(&self, context: &BrokeredIdentityContext) -> Vec<String> {
        let value = claim_value(context, &self.claim);
        to_prefixed_list(value.as_ref(), &self.prefix)
    }
}
