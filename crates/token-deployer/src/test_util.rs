//! Test doubles for the chain: an in-memory chain for the tests that depend
//! on timing and a mocked node for the alloy backed implementation.

use {
    crate::chain::{Chain, Receipt},
    alloy::{
        primitives::{Address, B256, TxHash},
        providers::{
            Provider,
            ProviderBuilder,
            mock::{Asserter, MockTransport},
        },
        rpc::{
            client::ClientBuilder,
            json_rpc::{RequestPacket, ResponsePacket},
            types::TransactionRequest,
        },
        transports::{TransportError, TransportFut},
    },
    anyhow::{Result, anyhow},
    ethrpc::AlloyProvider,
    std::{
        collections::{HashMap, HashSet},
        sync::{Arc, Mutex},
        task::{Context, Poll},
        time::Duration,
    },
    tokio::time::Instant,
    tower::{Layer, Service},
};

#[derive(Debug, Clone)]
pub struct Submission {
    pub request: TransactionRequest,
    pub tx_hash: TxHash,
    pub contract_address: Address,
    index: u64,
    sent_at: Instant,
}

/// Transactions get mined `receipt_delay` after submission; without a delay
/// they never are. Gas estimation fails unless an estimate is configured.
#[derive(Debug, Default)]
pub struct FakeChain {
    estimate: Option<u64>,
    receipt_delay: Option<Duration>,
    failing_submissions: HashMap<u64, String>,
    reverting_submissions: HashSet<u64>,
    calls: Mutex<u64>,
    submissions: Mutex<Vec<Submission>>,
}

impl FakeChain {
    pub fn with_estimate(mut self, gas: u64) -> Self {
        self.estimate = Some(gas);
        self
    }

    pub fn with_receipt_delay(mut self, delay: Duration) -> Self {
        self.receipt_delay = Some(delay);
        self
    }

    /// The `index`th call to `send_transaction` (0 based) fails with `message`.
    pub fn failing_submission(mut self, index: u64, message: &str) -> Self {
        self.failing_submissions.insert(index, message.to_string());
        self
    }

    /// The `index`th call to `send_transaction` gets mined but reverts.
    pub fn reverting_submission(mut self, index: u64) -> Self {
        self.reverting_submissions.insert(index);
        self
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Chain for FakeChain {
    async fn estimate_gas(&self, _: &TransactionRequest) -> Result<u64> {
        self.estimate
            .ok_or_else(|| anyhow!("execution reverted: estimation disabled"))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls - 1
        };
        if let Some(message) = self.failing_submissions.get(&index) {
            return Err(anyhow!(message.clone()));
        }

        let tx_hash = TxHash::left_padding_from(&(index + 1).to_be_bytes());
        let contract_address = Address::left_padding_from(&(0xc0de_0000 + index).to_be_bytes());
        self.submissions.lock().unwrap().push(Submission {
            request: tx,
            tx_hash,
            contract_address,
            index,
            sent_at: Instant::now(),
        });
        Ok(tx_hash)
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<Receipt>> {
        let Some(delay) = self.receipt_delay else {
            return Ok(None);
        };
        let submissions = self.submissions.lock().unwrap();
        let Some(submission) = submissions.iter().find(|s| s.tx_hash == tx_hash) else {
            return Ok(None);
        };
        if Instant::now() < submission.sent_at + delay {
            return Ok(None);
        }
        Ok(Some(Receipt {
            transaction_hash: tx_hash,
            block_number: 100 + submission.index,
            contract_address: Some(submission.contract_address),
            success: !self.reverting_submissions.contains(&submission.index),
        }))
    }

    async fn block_hash(&self, number: u64) -> Result<Option<B256>> {
        Ok(Some(B256::left_padding_from(&number.to_be_bytes())))
    }
}

/// JSON-RPC requests sent through a [`mocked_provider`], as method name and
/// params.
pub type RecordedRequests = Arc<Mutex<Vec<(String, serde_json::Value)>>>;

/// Provider with the production filler stack whose node answers with the
/// responses queued on `asserter`.
pub fn mocked_provider(asserter: Asserter) -> (AlloyProvider, RecordedRequests) {
    let recorded = RecordedRequests::default();
    let rpc = ClientBuilder::default()
        .layer(RecordingLayer(recorded.clone()))
        .transport(MockTransport::new(asserter), true);
    let provider = ProviderBuilder::new().connect_client(rpc).erased();
    (provider, recorded)
}

struct RecordingLayer(RecordedRequests);

impl<S> Layer<S> for RecordingLayer {
    type Service = Recording<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Recording {
            inner,
            recorded: self.0.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Recording<S> {
    inner: S,
    recorded: RecordedRequests,
}

impl<S> Service<RequestPacket> for Recording<S>
where
    S: Service<
            RequestPacket,
            Response = ResponsePacket,
            Error = TransportError,
            Future = TransportFut<'static>,
        >,
{
    type Error = TransportError;
    type Future = TransportFut<'static>;
    type Response = ResponsePacket;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: RequestPacket) -> Self::Future {
        let requests = req.requests().iter().map(|request| {
            let params = request
                .params()
                .map(|params| serde_json::from_str::<serde_json::Value>(params.get()).unwrap())
                .unwrap_or_default();
            (request.method().to_string(), params)
        });
        self.recorded.lock().unwrap().extend(requests);
        self.inner.call(req)
    }
}
