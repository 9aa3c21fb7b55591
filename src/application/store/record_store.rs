use crate::domain::entities::{Pagination, Record};
use crate::domain::value_objects::RecordId;
use std::collections::{BTreeMap, HashMap};

/// 復元用に保存したレコードと表示上の位置
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSnapshot<R> {
    pub record: R,
    pub position: usize,
    /// 直前のレコード ID（先頭なら `None`）
    pub previous: Option<RecordId>,
    /// 直後のレコード ID（末尾なら `None`）
    pub next: Option<RecordId>,
}

/// 表示順を保持するレコードコレクション（ID インデックス付き）
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
    index: HashMap<RecordId, usize>,
    pagination: Pagination,
    filters: BTreeMap<String, String>,
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            pagination: Pagination::default(),
            filters: BTreeMap::new(),
        }
    }

    /// 一覧取得後にコレクションを丸ごと差し替え
    pub fn replace_all(
        &mut self,
        records: Vec<R>,
        pagination: Pagination,
        filters: BTreeMap<String, String>,
    ) {
        self.records = Vec::with_capacity(records.len());
        self.index.clear();
        for record in records {
            // 重複 ID は後勝ちで最初の位置に置く
            let existing = self.index.get(record.record_id()).copied();
            match existing {
                Some(position) => self.records[position] = record,
                None => {
                    self.index
                        .insert(record.record_id().clone(), self.records.len());
                    self.records.push(record);
                }
            }
        }
        self.pagination = pagination;
        self.filters = filters;
    }

    pub fn find(&self, id: &RecordId) -> Option<&R> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.index.contains_key(id)
    }

    /// 同じ ID があれば置き換え、なければ末尾に追加
    pub fn upsert(&mut self, record: R) {
        let id = record.record_id().clone();
        if !self.replace_existing(&id, record.clone()) {
            self.index.insert(id, self.records.len());
            self.records.push(record);
        }
    }

    /// 既存レコードのフィールドを書き換える。存在しなければ何もしない。
    pub fn update<F>(&mut self, id: &RecordId, apply: F) -> bool
    where
        F: FnOnce(&mut R),
    {
        let Some(&position) = self.index.get(id) else {
            return false;
        };
        let mut next = self.records[position].clone();
        apply(&mut next);
        self.replace_existing(id, next)
    }

    /// `id` の位置にあるレコードを置き換える（ID の付け替えも可）。
    /// `id` が存在しなければ何もせず `false` を返す。
    pub fn replace_existing(&mut self, id: &RecordId, record: R) -> bool {
        let Some(mut position) = self.index.get(id).copied() else {
            return false;
        };

        let new_id = record.record_id().clone();
        if &new_id != id {
            // 付け替え先の ID が別の位置にあれば重複させない
            if let Some(duplicate) = self.index.get(&new_id).copied() {
                self.records.remove(duplicate);
                self.reindex_from(duplicate);
                if duplicate < position {
                    position -= 1;
                }
            }
            self.index.remove(id);
            self.index.insert(new_id, position);
        }
        self.records[position] = record;
        true
    }

    /// 指定位置に挿入（範囲外なら末尾）。同じ ID があれば置き換える。
    pub fn insert_at(&mut self, position: usize, record: R) {
        let id = record.record_id().clone();
        if self.replace_existing(&id, record.clone()) {
            return;
        }
        let position = position.min(self.records.len());
        self.records.insert(position, record);
        self.reindex_from(position);
    }

    /// 削除。存在しなければ何もしない。
    pub fn remove(&mut self, id: &RecordId) -> Option<RecordSnapshot<R>> {
        let position = self.position(id)?;
        let (previous, next) = self.neighbours(position);
        self.index.remove(id);
        let record = self.records.remove(position);
        self.reindex_from(position);
        Some(RecordSnapshot {
            record,
            position,
            previous,
            next,
        })
    }

    /// スナップショットを元の位置に戻す。
    ///
    /// 位置は保存時の隣接レコードを基準に決める。隣接レコードがどちらも
    /// 残っていなければ保存時の添字を使う。
    pub fn restore(&mut self, snapshot: RecordSnapshot<R>) {
        let anchored = match &snapshot.previous {
            None => Some(0),
            Some(previous) => self
                .position(previous)
                .map(|position| position + 1)
                .or_else(|| snapshot.next.as_ref().and_then(|next| self.position(next))),
        };
        self.insert_at(anchored.unwrap_or(snapshot.position), snapshot.record);
    }

    pub fn snapshot(&self, id: &RecordId) -> Option<RecordSnapshot<R>> {
        self.position(id).map(|position| {
            let (previous, next) = self.neighbours(position);
            RecordSnapshot {
                record: self.records[position].clone(),
                position,
                previous,
                next,
            }
        })
    }

    fn neighbours(&self, position: usize) -> (Option<RecordId>, Option<RecordId>) {
        let previous = position
            .checked_sub(1)
            .and_then(|before| self.records.get(before))
            .map(|record| record.record_id().clone());
        let next = self
            .records
            .get(position + 1)
            .map(|record| record.record_id().clone());
        (previous, next)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    fn reindex_from(&mut self, start: usize) {
        for (position, record) in self.records.iter().enumerate().skip(start) {
            self.index.insert(record.record_id().clone(), position);
        }
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: RecordId,
        label: String,
        updated_at: DateTime<Utc>,
    }

    impl Record for Item {
        fn record_id(&self) -> &RecordId {
            &self.id
        }

        fn touch(&mut self, now: DateTime<Utc>) {
            self.updated_at = now;
        }
    }

    fn item(id: &str, label: &str) -> Item {
        Item {
            id: RecordId::confirmed(id),
            label: label.to_string(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn ids(store: &RecordStore<Item>) -> Vec<String> {
        store.records().iter().map(|i| i.id.to_string()).collect()
    }

    fn store_with(labels: &[&str]) -> RecordStore<Item> {
        let mut store = RecordStore::new();
        store.replace_all(
            labels.iter().map(|id| item(id, id)).collect(),
            Pagination::default(),
            BTreeMap::new(),
        );
        store
    }

    #[test]
    fn test_replace_all_deduplicates_ids() {
        let mut store = RecordStore::new();
        store.replace_all(
            vec![item("a", "first"), item("b", "b"), item("a", "second")],
            Pagination::default(),
            BTreeMap::from([("status".to_string(), "open".to_string())]),
        );

        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.find(&"a".into()).unwrap().label, "second");
        assert_eq!(store.filters().get("status").map(String::as_str), Some("open"));
    }

    #[test]
    fn test_upsert_replaces_in_place_or_appends() {
        let mut store = store_with(&["a", "b", "c"]);
        store.upsert(item("b", "changed"));
        store.upsert(item("d", "d"));

        assert_eq!(ids(&store), vec!["a", "b", "c", "d"]);
        assert_eq!(store.find(&"b".into()).unwrap().label, "changed");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = store_with(&["a"]);
        assert!(store.remove(&"zzz".into()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_then_restore_keeps_order() {
        let mut store = store_with(&["a", "b", "c"]);
        let snapshot = store.remove(&"b".into()).unwrap();
        assert_eq!(ids(&store), vec!["a", "c"]);
        assert_eq!(store.position(&"c".into()), Some(1));

        store.restore(snapshot);
        assert_eq!(ids(&store), vec!["a", "b", "c"]);
        assert_eq!(store.position(&"c".into()), Some(2));
    }

    #[test]
    fn test_restores_in_removal_order_keep_original_order() {
        let mut store = store_with(&["a", "b", "c"]);
        let b = store.remove(&"b".into()).unwrap();
        let a = store.remove(&"a".into()).unwrap();
        assert_eq!(ids(&store), vec!["c"]);

        store.restore(b);
        assert_eq!(ids(&store), vec!["b", "c"]);
        store.restore(a);
        assert_eq!(ids(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_restore_falls_back_to_saved_position_without_neighbours() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        let c = store.remove(&"c".into()).unwrap();
        store.remove(&"b".into());
        store.remove(&"d".into());
        store.upsert(item("e", "e"));

        store.restore(c);
        assert_eq!(ids(&store), vec!["a", "e", "c"]);
    }

    #[test]
    fn test_replace_existing_swaps_pending_id_for_confirmed() {
        let mut store = store_with(&["a", "b"]);
        let (pending, _) = RecordId::pending();
        store.insert_at(
            0,
            Item {
                id: pending.clone(),
                label: "draft".to_string(),
                updated_at: Utc::now(),
            },
        );

        assert!(store.replace_existing(&pending, item("c", "saved")));
        assert_eq!(ids(&store), vec!["c", "a", "b"]);
        assert!(store.find(&pending).is_none());
        assert_eq!(store.position(&"c".into()), Some(0));
    }

    #[test]
    fn test_replace_existing_drops_duplicate_target() {
        let mut store = store_with(&["a", "c"]);
        let (pending, _) = RecordId::pending();
        store.upsert(Item {
            id: pending.clone(),
            label: "draft".to_string(),
            updated_at: Utc::now(),
        });

        assert!(store.replace_existing(&pending, item("a", "saved")));
        assert_eq!(ids(&store), vec!["c", "a"]);
        assert_eq!(store.find(&"a".into()).unwrap().label, "saved");
    }

    #[test]
    fn test_replace_existing_on_missing_id_is_noop() {
        let mut store = store_with(&["a"]);
        assert!(!store.replace_existing(&"b".into(), item("b", "b")));
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = store_with(&["a", "b"]);
        assert!(store.update(&"a".into(), |item| item.label = "patched".to_string()));
        assert!(!store.update(&"x".into(), |item| item.label = "never".to_string()));
        assert_eq!(store.find(&"a".into()).unwrap().label, "patched");
    }
}
