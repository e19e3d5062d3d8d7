//! Commission rates, manual balance adjustments, UPI payee records and QR
//! payment images.

use jiff::Timestamp;
use payloads::requests::{AddRecharge, MinusRecharge, UpiDetails};
use payloads::responses::{CommissionRates, QrCode, UpiRecord};
use payloads::{QrCodeId, UpiRecordId};
use rust_decimal::Decimal;

use super::{Store, StoreError, new_id, newest_first, require_positive};

fn qr_url(qr_id: &QrCodeId, filename: &str) -> String {
    format!("/uploads/qr/{qr_id}-{filename}")
}

impl Store {
    pub fn commission(&self) -> CommissionRates {
        self.lock().commission.clone()
    }

    pub fn set_commission(
        &self,
        rates: &CommissionRates,
    ) -> Result<CommissionRates, StoreError> {
        let levels = [rates.level1, rates.level2, rates.level3];
        if levels.iter().any(|rate| *rate < Decimal::ZERO) {
            return Err(StoreError::InvalidAmount);
        }
        self.lock().commission = rates.clone();
        Ok(rates.clone())
    }

    /// Credit a user found by phone. Returns the new balance.
    pub fn add_recharge(
        &self,
        details: &AddRecharge,
    ) -> Result<Decimal, StoreError> {
        let amount = require_positive(details.amount)?;
        self.credit_user(&details.phone, amount, &details.utr)
    }

    /// Debit a user found by phone. The balance may reach zero but not go
    /// below it.
    pub fn minus_recharge(
        &self,
        details: &MinusRecharge,
    ) -> Result<Decimal, StoreError> {
        let amount = require_positive(details.amount)?;
        self.debit_user(&details.phone, amount)
    }

    pub fn create_upi(
        &self,
        details: &UpiDetails,
    ) -> Result<UpiRecord, StoreError> {
        let mut data = self.lock();
        if data.upis.iter().any(|u| u.upi_id == details.upi_id) {
            return Err(StoreError::UpiNotUnique);
        }
        let record = UpiRecord {
            id: UpiRecordId(new_id()),
            upi_id: details.upi_id.clone(),
            payee_name: details.payee_name.clone(),
        };
        data.upis.push(record.clone());
        Ok(record)
    }

    pub fn list_upis(&self) -> Vec<UpiRecord> {
        newest_first(&self.lock().upis)
    }

    pub fn get_upi(
        &self,
        upi_id: &UpiRecordId,
    ) -> Result<UpiRecord, StoreError> {
        self.lock()
            .upis
            .iter()
            .find(|u| &u.id == upi_id)
            .cloned()
            .ok_or(StoreError::UpiNotFound)
    }

    pub fn update_upi(
        &self,
        upi_id: &UpiRecordId,
        details: &UpiDetails,
    ) -> Result<UpiRecord, StoreError> {
        let mut data = self.lock();
        if data
            .upis
            .iter()
            .any(|u| &u.id != upi_id && u.upi_id == details.upi_id)
        {
            return Err(StoreError::UpiNotUnique);
        }
        let record = data
            .upis
            .iter_mut()
            .find(|u| &u.id == upi_id)
            .ok_or(StoreError::UpiNotFound)?;
        record.upi_id = details.upi_id.clone();
        record.payee_name = details.payee_name.clone();
        Ok(record.clone())
    }

    pub fn delete_upi(&self, upi_id: &UpiRecordId) -> Result<(), StoreError> {
        let mut data = self.lock();
        let before = data.upis.len();
        data.upis.retain(|u| &u.id != upi_id);
        if data.upis.len() == before {
            return Err(StoreError::UpiNotFound);
        }
        Ok(())
    }

    pub fn add_qr_code(&self, filename: &str) -> QrCode {
        let id = QrCodeId(new_id());
        let qr = QrCode {
            url: qr_url(&id, filename),
            id,
            filename: filename.to_string(),
            created_at: Some(Timestamp::now()),
        };
        self.lock().qr_codes.push(qr.clone());
        qr
    }

    pub fn list_qr_codes(&self) -> Vec<QrCode> {
        newest_first(&self.lock().qr_codes)
    }

    pub fn replace_qr_code(
        &self,
        qr_id: &QrCodeId,
        filename: &str,
    ) -> Result<QrCode, StoreError> {
        let mut data = self.lock();
        let qr = data
            .qr_codes
            .iter_mut()
            .find(|q| &q.id == qr_id)
            .ok_or(StoreError::QrCodeNotFound)?;
        qr.filename = filename.to_string();
        qr.url = qr_url(qr_id, filename);
        Ok(qr.clone())
    }

    pub fn delete_qr_code(&self, qr_id: &QrCodeId) -> Result<(), StoreError> {
        let mut data = self.lock();
        let before = data.qr_codes.len();
        data.qr_codes.retain(|q| &q.id != qr_id);
        if data.qr_codes.len() == before {
            return Err(StoreError::QrCodeNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewUser;
    use rust_decimal::dec;

    #[test]
    fn upi_ids_are_unique() {
        let store = Store::default();
        let details = UpiDetails {
            upi_id: "shop@upi".into(),
            payee_name: "Shop".into(),
        };
        let first = store.create_upi(&details).unwrap();
        assert!(matches!(
            store.create_upi(&details),
            Err(StoreError::UpiNotUnique)
        ));
        // renaming a record to its own id is not a conflict
        store.update_upi(&first.id, &details).unwrap();
    }

    #[test]
    fn recharge_amounts_must_be_positive() {
        let store = Store::default();
        store.insert_user(NewUser {
            phone: "9000000000".into(),
            ..Default::default()
        });
        let minus = MinusRecharge {
            amount: Decimal::ZERO,
            phone: "9000000000".into(),
        };
        assert!(matches!(
            store.minus_recharge(&minus),
            Err(StoreError::InvalidAmount)
        ));
        let add = AddRecharge {
            utr: "UTR1".into(),
            amount: dec!(50),
            phone: "9000000000".into(),
        };
        assert_eq!(store.add_recharge(&add).unwrap(), dec!(50));
    }

    #[test]
    fn replacing_a_qr_keeps_its_id() {
        let store = Store::default();
        let qr = store.add_qr_code("a.png");
        let replaced = store.replace_qr_code(&qr.id, "b.png").unwrap();
        assert_eq!(replaced.id, qr.id);
        assert!(replaced.url.ends_with("b.png"));
        assert_eq!(store.list_qr_codes().len(), 1);
    }
}
