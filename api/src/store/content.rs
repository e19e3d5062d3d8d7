use payloads::requests::{GiftcodeDetails, SocialLinksDetails};
use payloads::responses::{Giftcode, SocialLinks};
use payloads::{GiftcodeId, SocialLinkId};

use super::{Store, StoreError, new_id, newest_first, require_positive};

impl Store {
    pub fn list_social_links(&self) -> Vec<SocialLinks> {
        newest_first(&self.lock().social_links)
    }

    pub fn create_social_links(
        &self,
        details: &SocialLinksDetails,
    ) -> SocialLinks {
        let links = SocialLinks {
            id: SocialLinkId(new_id()),
            telegram_username_link: details.telegram_username_link.clone(),
            telegram_group_link: details.telegram_group_link.clone(),
        };
        self.lock().social_links.push(links.clone());
        links
    }

    pub fn update_social_links(
        &self,
        link_id: &SocialLinkId,
        details: &SocialLinksDetails,
    ) -> Result<SocialLinks, StoreError> {
        let mut data = self.lock();
        let links = data
            .social_links
            .iter_mut()
            .find(|l| &l.id == link_id)
            .ok_or(StoreError::SocialLinksNotFound)?;
        links.telegram_username_link = details.telegram_username_link.clone();
        links.telegram_group_link = details.telegram_group_link.clone();
        Ok(links.clone())
    }

    pub fn delete_social_links(
        &self,
        link_id: &SocialLinkId,
    ) -> Result<(), StoreError> {
        let mut data = self.lock();
        let before = data.social_links.len();
        data.social_links.retain(|l| &l.id != link_id);
        if data.social_links.len() == before {
            return Err(StoreError::SocialLinksNotFound);
        }
        Ok(())
    }

    /// Gift codes, newest first. A `limit` of zero means all of them.
    pub fn list_giftcodes(&self, limit: usize) -> Vec<Giftcode> {
        let giftcodes = newest_first(&self.lock().giftcodes);
        match limit {
            0 => giftcodes,
            limit => giftcodes.into_iter().take(limit).collect(),
        }
    }

    pub fn get_giftcode(
        &self,
        giftcode_id: &GiftcodeId,
    ) -> Result<Giftcode, StoreError> {
        self.lock()
            .giftcodes
            .iter()
            .find(|g| &g.id == giftcode_id)
            .cloned()
            .ok_or(StoreError::GiftcodeNotFound)
    }

    pub fn create_giftcode(
        &self,
        details: &GiftcodeDetails,
    ) -> Result<Giftcode, StoreError> {
        let amount = require_positive(details.amount)?;
        let mut data = self.lock();
        if data.giftcodes.iter().any(|g| g.code == details.code) {
            return Err(StoreError::GiftcodeNotUnique {
                code: details.code.clone(),
            });
        }
        let giftcode = Giftcode {
            id: GiftcodeId(new_id()),
            code: details.code.clone(),
            amount,
            usage_limit: details.usage_limit,
            used_count: 0,
        };
        data.giftcodes.push(giftcode.clone());
        Ok(giftcode)
    }

    /// Change code, amount and usage limit. Redemptions so far are kept.
    pub fn update_giftcode(
        &self,
        giftcode_id: &GiftcodeId,
        details: &GiftcodeDetails,
    ) -> Result<Giftcode, StoreError> {
        let amount = require_positive(details.amount)?;
        let mut data = self.lock();
        if data
            .giftcodes
            .iter()
            .any(|g| &g.id != giftcode_id && g.code == details.code)
        {
            return Err(StoreError::GiftcodeNotUnique {
                code: details.code.clone(),
            });
        }
        let giftcode = data
            .giftcodes
            .iter_mut()
            .find(|g| &g.id == giftcode_id)
            .ok_or(StoreError::GiftcodeNotFound)?;
        giftcode.code = details.code.clone();
        giftcode.amount = amount;
        giftcode.usage_limit = details.usage_limit;
        Ok(giftcode.clone())
    }

    pub fn delete_giftcode(
        &self,
        giftcode_id: &GiftcodeId,
    ) -> Result<(), StoreError> {
        let mut data = self.lock();
        let before = data.giftcodes.len();
        data.giftcodes.retain(|g| &g.id != giftcode_id);
        if data.giftcodes.len() == before {
            return Err(StoreError::GiftcodeNotFound);
        }
        Ok(())
    }
}
